//! HTML for the front page.

use std::sync::LazyLock;

use crate::consts::VERSION;
use crate::guestbook::Greeting;

/// The static parts of the page, assembled once per process.
struct PageTemplate {
    head: String,
    tail: String,
}

static GUESTBOOK_PAGE: LazyLock<PageTemplate> = LazyLock::new(|| PageTemplate {
    head: "<html>\n  <head>\n    <title>Guestbook</title>\n  </head>\n  <body>\n".to_string(),
    tail: format!(
        r#"    <form action="/sign" method="post">
      <div><textarea name="content" rows="3" cols="60"></textarea></div>
      <div><input type="submit" value="Sign Guestbook"></div>
    </form>
    <div class="runtime-version">
      guestbook version: {VERSION}
    </div>
  </body>
</html>
"#
    ),
});

/// Render the greeting list followed by the sign form.
pub fn render_guestbook(greetings: &[Greeting]) -> String {
    let page = &*GUESTBOOK_PAGE;
    let mut out = String::with_capacity(page.head.len() + page.tail.len() + greetings.len() * 128);
    out.push_str(&page.head);
    for greeting in greetings {
        if greeting.author.is_empty() {
            out.push_str("    <p>An anonymous person wrote:</p>\n");
        } else {
            out.push_str(&format!(
                "    <p><b>{}</b> wrote:</p>\n",
                escape_html(&greeting.author)
            ));
        }
        out.push_str(&format!(
            "    <pre>{}</pre>\n",
            escape_html(&greeting.content)
        ));
    }
    out.push_str(&page.tail);
    out
}

/// Link shown on `/welcome` to anonymous visitors.
pub fn render_sign_in(login_url: &str) -> String {
    format!(r#"<a href="{}">Sign in or register</a>"#, escape_html(login_url))
}

/// Greeting shown on `/welcome` to signed-in users.
pub fn render_welcome(user: &str, logout_url: &str) -> String {
    format!(
        r#"Welcome, {}! (<a href="{}">sign out</a>)"#,
        escape_html(user),
        escape_html(logout_url)
    )
}

/// Escape text for use in element content and quoted attributes.
pub fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&#34;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
