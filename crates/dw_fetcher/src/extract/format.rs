use chrono::{NaiveDate, NaiveTime, SecondsFormat, TimeZone, Utc};
use dw_core::SiteIdentity;

/// Percent-decoded form of `url` for display. Undecodable input is kept
/// verbatim with the error appended.
fn readable_url(url: &str) -> String {
    match urlencoding::decode(&url.replace('+', " ")) {
        Ok(decoded) => decoded.into_owned(),
        Err(e) => format!("{}\n\nunescape url error:\n{}", url, e),
    }
}

/// Final text of a record: heading, metadata line, body and source footer.
pub fn format_document(
    title: &str,
    date: NaiveDate,
    body: &str,
    source_url: &str,
    site: &SiteIdentity,
) -> String {
    let last_update = Utc
        .from_utc_datetime(&date.and_time(NaiveTime::default()))
        .to_rfc3339_opts(SecondsFormat::Secs, true);
    let site_link = format!(
        " @ [{title}](/list/?v={title}): [{domain}](http://{domain})",
        title = site.title,
        domain = site.domain
    );
    let url = readable_url(source_url);

    format!(
        "# {}\n\nLastUpdate: {}{}\n\n---\n{}\n\n原地址：[{}]({})",
        title, last_update, site_link, body, url, url
    )
}
