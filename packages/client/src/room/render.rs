//! Chat message rendering and the elapsed-time display.

const EMOTICONS: [(&str, &str); 5] = [
    (":)", "😊"),
    (":(", "😢"),
    (":D", "😃"),
    (":|", "😐"),
    // `<3` after escaping
    ("&lt;3", "❤️"),
];

/// Render a chat body as HTML: escape, then linkify. Emoticons are
/// substituted only outside links so every anchor target is the URL as typed.
pub fn render_message(text: &str) -> String {
    let escaped = escape_html(text);
    let mut out = String::with_capacity(escaped.len());
    let mut rest = escaped.as_str();

    while let Some(start) = find_url_start(rest) {
        out.push_str(&substitute_emoticons(&rest[..start]));
        let tail = &rest[start..];
        let end = tail.find(char::is_whitespace).unwrap_or(tail.len());
        let url = &tail[..end];
        out.push_str(&format!(
            r#"<a href="{url}" target="_blank" rel="noopener noreferrer">{url}</a>"#
        ));
        rest = &tail[end..];
    }

    out.push_str(&substitute_emoticons(rest));
    out
}

/// Escape the characters that matter inside HTML text and attributes
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

fn substitute_emoticons(segment: &str) -> String {
    let mut html = segment.to_string();
    for (emoticon, emoji) in EMOTICONS {
        html = html.replace(emoticon, emoji);
    }
    html
}

fn find_url_start(text: &str) -> Option<usize> {
    match (text.find("http://"), text.find("https://")) {
        (Some(a), Some(b)) => Some(a.min(b)),
        (a, b) => a.or(b),
    }
}

/// `HH:MM:SS` for an elapsed duration. Negative input shows as zero.
pub fn format_elapsed(elapsed_millis: i64) -> String {
    let total = elapsed_millis.max(0) / 1000;
    format!(
        "{:02}:{:02}:{:02}",
        total / 3600,
        (total % 3600) / 60,
        total % 60
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_emoticons_are_substituted() {
        // テスト項目: 顔文字が絵文字に置き換わる
        // given (前提条件):
        let text = "hi :) :( :D :| <3";

        // when (操作):
        let html = render_message(text);

        // then (期待する結果):
        assert_eq!(html, "hi 😊 😢 😃 😐 ❤️");
    }

    #[test]
    fn test_markup_is_escaped_before_substitution() {
        // テスト項目: HTML はエスケープされ、スクリプトとして解釈されない
        // given (前提条件):
        let text = r#"<script>alert("x")</script>"#;

        // when (操作):
        let html = render_message(text);

        // then (期待する結果):
        assert_eq!(
            html,
            "&lt;script&gt;alert(&quot;x&quot;)&lt;/script&gt;"
        );
    }

    #[test]
    fn test_urls_become_anchors() {
        // テスト項目: URL がリンクに変換され href が URL と一致する
        // given (前提条件):
        let text = "see https://example.com/a?b=1 and http://x.org";

        // when (操作):
        let html = render_message(text);

        // then (期待する結果):
        assert_eq!(
            html,
            concat!(
                r#"see <a href="https://example.com/a?b=1" target="_blank" rel="noopener noreferrer">https://example.com/a?b=1</a>"#,
                r#" and <a href="http://x.org" target="_blank" rel="noopener noreferrer">http://x.org</a>"#,
            )
        );
    }

    #[test]
    fn test_repeated_emoticons_are_all_substituted() {
        // テスト項目: 同じ顔文字が何度出てきてもすべて置き換わる
        // given (前提条件):
        let text = ":):):) <3<3 :D:(";

        // when (操作):
        let html = render_message(text);

        // then (期待する結果):
        assert_eq!(html, "😊😊😊 ❤️❤️ 😃😢");
    }

    #[test]
    fn test_emoticons_inside_urls_are_kept() {
        // テスト項目: URL 内の顔文字は置き換えられず、href が URL と一致する
        // given (前提条件):
        let text = "see https://example.com/?q=:D&r=:) :) <3";

        // when (操作):
        let html = render_message(text);

        // then (期待する結果):
        let url = "https://example.com/?q=:D&amp;r=:)";
        assert_eq!(
            html,
            format!(
                r#"see <a href="{url}" target="_blank" rel="noopener noreferrer">{url}</a> 😊 ❤️"#
            )
        );
    }

    #[test]
    fn test_heart_inside_url_is_kept() {
        // テスト項目: URL 内の <3 はエスケープされたまま残る
        // given (前提条件):
        let text = "http://x.org/<3";

        // when (操作):
        let html = render_message(text);

        // then (期待する結果):
        assert!(html.starts_with(r#"<a href="http://x.org/&lt;3""#));
        assert!(!html.contains("❤️"));
    }

    #[test]
    fn test_plain_text_is_unchanged() {
        // テスト項目: 特殊な記号を含まない文はそのまま
        // given (前提条件):
        let text = "good morning";

        // when (操作):
        let html = render_message(text);

        // then (期待する結果):
        assert_eq!(html, "good morning");
    }

    #[test]
    fn test_format_elapsed() {
        // テスト項目: 経過時間が HH:MM:SS で表示される
        // given (前提条件):
        let elapsed = (2 * 3600 + 5 * 60 + 9) * 1000 + 999;

        // when (操作):
        let shown = format_elapsed(elapsed);

        // then (期待する結果):
        assert_eq!(shown, "02:05:09");
        assert_eq!(format_elapsed(-5), "00:00:00");
    }
}
