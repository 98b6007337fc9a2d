use ammonia;

/// Clean HTML content using the ammonia library.
///
/// Whitelist-based: safe tags (like <b>, <p>) survive, while <script>, <iframe>
/// and event-handler attributes are stripped.
///
/// Article bodies go through this before the detail page renders them unescaped.
pub fn clean_html(input: &str) -> String {
    ammonia::clean(input)
}
