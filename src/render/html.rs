//! HTML fragment helpers

/// Escape text for inclusion in element content or a quoted attribute
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            c => out.push(c),
        }
    }
    out
}

/// `<p class="{class}">{text}</p>` with `text` escaped
pub fn paragraph(class: &str, text: &str) -> String {
    format!("<p class=\"{}\">{}</p>", class, escape(text))
}
