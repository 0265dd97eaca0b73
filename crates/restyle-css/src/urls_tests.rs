use super::*;

const ORIGIN: &str = "https://example.com";

#[test]
fn test_root_relative_rewritten() {
    assert_eq!(
        absolutize_root_relative("background: url(/img/a.png)", ORIGIN),
        "background: url(https://example.com/img/a.png)"
    );
}

#[test]
fn test_quotes_preserved() {
    assert_eq!(
        absolutize_root_relative("background: url('/a.png')", ORIGIN),
        "background: url('https://example.com/a.png')"
    );
    assert_eq!(
        absolutize_root_relative("background: url( \"/a.png\" )", ORIGIN),
        "background: url(\"https://example.com/a.png\")"
    );
}

#[test]
fn test_protocol_relative_untouched() {
    let css = "background: url(//cdn.example.net/a.png)";
    assert_eq!(absolutize_root_relative(css, ORIGIN), css);
    assert_eq!(absolutize_stylesheet_urls(css, ORIGIN), css);
}

#[test]
fn test_absolute_and_data_untouched() {
    let css = "a { background: url(https://x.test/a.png), url(data:image/png;base64,AAAA) }";
    assert_eq!(absolutize_stylesheet_urls(css, ORIGIN), css);
}

#[test]
fn test_inline_style_ignores_parent_relative() {
    let css = "background: url(../a.png)";
    assert_eq!(absolutize_root_relative(css, ORIGIN), css);
}

#[test]
fn test_stylesheet_parent_relative_flattened() {
    assert_eq!(
        absolutize_stylesheet_urls(".a { background: url(../img/bg.png) }", ORIGIN),
        ".a { background: url(https://example.com/img/bg.png) }"
    );
}

#[test]
fn test_stylesheet_root_relative_in_font_face() {
    assert_eq!(
        absolutize_stylesheet_urls("@font-face { src: url(\"/f.woff2\") }", ORIGIN),
        "@font-face { src: url(\"https://example.com/f.woff2\") }"
    );
}

#[test]
fn test_comment_urls_untouched() {
    let css = "/* url(/old.png) */ a { background: url(/new.png) }";
    assert_eq!(
        absolutize_stylesheet_urls(css, ORIGIN),
        "/* url(/old.png) */ a { background: url(https://example.com/new.png) }"
    );
}

#[test]
fn test_plain_relative_untouched() {
    let css = "a { background: url(img/a.png) }";
    assert_eq!(absolutize_stylesheet_urls(css, ORIGIN), css);
}
