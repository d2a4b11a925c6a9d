//! HTML for the listing and edit pages.

use std::fmt::Write;

use crate::index::WorkIndex;
use crate::model::WorkItem;

const FORM_DATETIME: &str = "%Y-%m-%dT%H:%M:%S";
const DISPLAY_DATETIME: &str = "%Y-%m-%d %H:%M:%S";

fn page(title: &str, body: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n\
         <title>{title}</title>\n<link rel=\"stylesheet\" href=\"/views/style.css\">\n\
         </head>\n<body>\n{body}</body>\n</html>\n",
        title = escape(title),
    )
}

/// Listing page: the create form followed by one table row per index entry.
pub fn render_index(index: &WorkIndex) -> String {
    let mut body = String::new();
    body.push_str("<h1>Work log</h1>\n");
    body.push_str(
        "<form method=\"post\" action=\"/create\">\n\
         <label>User <input type=\"number\" name=\"userid\"></label>\n\
         <label>Date and time <input type=\"datetime-local\" step=\"1\" name=\"workdatetime\"></label>\n\
         <label>Type <input type=\"text\" name=\"timetype\" list=\"timetypes\"></label>\n\
         <datalist id=\"timetypes\"><option value=\"in\"><option value=\"out\"></datalist>\n\
         <button type=\"submit\">Add</button>\n</form>\n",
    );

    body.push_str(
        "<table>\n<thead><tr><th>User</th><th>Day</th><th>Type</th><th>Recorded at</th><th></th></tr></thead>\n<tbody>\n",
    );
    for (key, item) in index {
        let _ = writeln!(
            body,
            "<tr data-user=\"{user}\" data-day=\"{day}\" data-type=\"{kind}\">\
             <td>{user}</td><td>{day}</td><td>{kind}</td><td>{at}</td>\
             <td><a href=\"/edit?id={id}\">edit</a></td></tr>",
            user = key.user_id,
            day = key.day,
            kind = escape(&key.time_type),
            at = item.work_datetime.format(DISPLAY_DATETIME),
            id = item.id,
        );
    }
    body.push_str("</tbody>\n</table>\n");

    page("Work log", &body)
}

/// Edit form for a single item. An empty record renders with zero values.
pub fn render_edit(item: &WorkItem) -> String {
    let mut body = String::new();
    let _ = write!(
        body,
        "<h1>Edit work item</h1>\n\
         <form method=\"post\" action=\"/update\">\n\
         <input type=\"hidden\" name=\"id\" value=\"{id}\">\n\
         <label>User <input type=\"number\" name=\"userid\" value=\"{user}\" readonly></label>\n\
         <label>Date and time <input type=\"datetime-local\" step=\"1\" name=\"workdatetime\" value=\"{at}\"></label>\n\
         <label>Type <input type=\"text\" name=\"timetype\" value=\"{kind}\"></label>\n\
         <button type=\"submit\">Save</button>\n</form>\n\
         <p><a href=\"/\">Back</a></p>\n",
        id = item.id,
        user = item.user_id,
        at = item.work_datetime.format(FORM_DATETIME),
        kind = escape(&item.time_type),
    );

    page("Edit work item", &body)
}

/// Escapes text for element content and quoted attribute values.
pub fn escape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            other => out.push(other),
        }
    }
    out
}
