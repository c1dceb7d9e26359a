/*!

This is the long-form manual for `survey_sections` and `surveycharts`.

## Input formats

### Raw exports

A raw export is a JSON object. Each key is the title of a question, as asked
in the survey, and each value describes the answers:

```json
{
  "Do you use Docker?": {
    "total_responses": 120,
    "options": [
      { "option": "Yes", "count": 90, "percentage": 75.0 },
      { "option": "No", "count": 20, "percentage": 16.7 }
    ]
  }
}
```

`total_responses`, `count` and `percentage` may be absent (the 2024-2025
exports only have percentages). They are read as zero. `text` may carry a
free-text excerpt for the option.

The order of the questions in the file is the order of the charts on the
page.

### Datasets

`surveycharts transform` writes the uniform model:

```json
{
  "total_responses": 120,
  "sections": [
    {
      "title": "Do you use Docker?",
      "responses": 120,
      "missing": 10,
      "distribution": [ { "value": "Yes", "count": 90, "percentage": 75.0 } ]
    }
  ]
}
```

`missing` is the number of respondents not accounted for by the counts. It
is 0 when the number of responses is not known.

### Catalog

The catalog lists, for each survey year, the categories, their data files and
the questions to display:

```json
{
  "dataDir": "data",
  "years": [
    {
      "year": "2025-2026",
      "demographics": { "dataFile": "demographics.json", "questions": [] },
      "categories": [
        {
          "id": "data-engineering",
          "title": "Data Engineering",
          "shortTitle": "DE",
          "description": "Tools and practices",
          "icon": "database",
          "dataFile": "data_engineering.json",
          "questions": [
            {
              "key": "do_you_work_with_data_engineering_tools_or_practices",
              "title": "Data Engineering Adoption",
              "description": "Most respondents do.",
              "chartType": "pie"
            }
          ]
        }
      ]
    }
  ]
}
```

`chartType` is one of `bar`, `horizontal-bar`, `pie`, `wordcloud`,
`citations`, `tags`. When it is omitted, the chart type is inferred.

## Matching questions to sections

Question keys are written by hand and rarely equal the titles of the export.
A key is matched in two steps.

### Exact step

The key and the titles are normalized: lower case, underscores turned into
spaces, every character other than ASCII letters, digits and spaces removed,
whitespace collapsed. A title matches if it is equal to the key. Failing
that, the first title that contains the key, or that is contained in the key,
matches. This covers keys that shorten or lengthen the title.

### Keyword step

The keywords of a text are its normalized words of three characters or more
that are not function words. Two keywords match when one contains the other,
so `ide` matches `ides` and `used` matches `use`. The score of a section is
the number of keywords of the key that match a keyword of the title, divided
by the size of the larger of the two keyword lists. The best section is kept
if its score is at least 0.3. Equal scores keep the earlier section.

Note: dividing by the larger list penalizes long titles against short keys.
The catalogs were tuned against this behavior.

### No match

A key that does not match is not an error: the question has no data for this
year. Sections that no question claims are still displayed, under their own
title and with an inferred chart type.

## Chart types

Without a configured chart type:
* no options: `bar`
* two options, one of which is yes/no/true/false/y/n: `pie`
* up to five options: `bar`
* more than five options: `horizontal-bar`

Word clouds, citations and tags must be configured explicitly.

## Maintenance

`surveycharts recompute FILE...` rewrites the percentages of dataset files
from their counts, relative to the sum of the counts of each section, rounded
to one decimal. It modifies the files in place and is never run as part of
the other commands.

*/
