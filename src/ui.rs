use crate::models::ViewCounts;

/// Element ids the page exposes for each count, in display order.
pub const SLOTS: [&str; 5] = [
    "daily-views",
    "weekly-views",
    "monthly-views",
    "yearly-views",
    "all-time-views",
];

pub fn render_index(counts: &ViewCounts) -> String {
    INDEX_HTML
        .replace("{{DAILY}}", &counts.daily.to_string())
        .replace("{{WEEKLY}}", &counts.weekly.to_string())
        .replace("{{MONTHLY}}", &counts.monthly.to_string())
        .replace("{{YEARLY}}", &counts.yearly.to_string())
        .replace("{{ALL_TIME}}", &counts.all_time.to_string())
}

const INDEX_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1.0" />
  <title>Views</title>
  <style>
    body {
      margin: 0;
      background: #eef2ff;
      color: #000;
      font-family: arial, helvetica, sans-serif;
      font-size: 13px;
      display: grid;
      place-items: center;
      padding: 24px 12px;
    }

    .views {
      background: #d6daf0;
      border: 1px solid #b7c5d9;
      padding: 10px 16px;
      display: grid;
      grid-template-columns: repeat(5, auto);
      gap: 4px 18px;
    }

    .views .label {
      color: #34345c;
      font-weight: 700;
    }

    .views .value {
      color: #0f0c5d;
    }
  </style>
</head>
<body>
  <div class="views">
    <span class="label">Today</span>
    <span class="label">This week</span>
    <span class="label">This month</span>
    <span class="label">This year</span>
    <span class="label">All time</span>
    <span id="daily-views" class="value">{{DAILY}}</span>
    <span id="weekly-views" class="value">{{WEEKLY}}</span>
    <span id="monthly-views" class="value">{{MONTHLY}}</span>
    <span id="yearly-views" class="value">{{YEARLY}}</span>
    <span id="all-time-views" class="value">{{ALL_TIME}}</span>
  </div>
</body>
</html>
"#;
