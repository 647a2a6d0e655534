use super::*;

use chrono::{Datelike, Local};

pub(crate) fn current_year() -> String {
    Local::now().year().to_string()
}

pub(crate) fn homepage_html(footer_year: &str) -> String {
    format!(
        r#"
        <!DOCTYPE html>
        <html>
        <head>
          <title>My Web Application - Home</title>
          <style>
            [data-testid="mobile-menu-button"] {{ display: none; }}
            @media (max-width: 768px) {{
              [data-testid="mobile-menu-button"] {{ display: block; }}
              [data-testid="desktop-menu"] {{ display: none; }}
            }}
          </style>
        </head>
        <body>
          <nav>
            <button data-testid="mobile-menu-button">Menu</button>
            <ul data-testid="desktop-menu">
              <li><a href="/">Home</a></li>
              <li><a href="/about" hidden>About</a></li>
              <li><a id="nav-contact" href="/contact">Contact</a></li>
            </ul>
          </nav>
          <main>
            <h1 hidden>Welcome to My Web Application</h1>
            <img src="/assets/logo.png" alt="logo">
            <div class="search">
              <input data-testid="search-input" type="text">
              <button data-testid="search-submit" type="button">Search</button>
              <section data-testid="search-results" hidden>
                <p>No results yet.</p>
              </section>
            </div>
            <section id="contact" hidden>
              <form data-testid="contact-form">
                <input name="name" type="text">
                <input name="email" type="email">
                <textarea name="message"></textarea>
                <button type="submit">Send</button>
              </form>
              <p data-testid="form-success-message" hidden>Thanks! We got your message.</p>
            </section>
          </main>
          <footer>
            <p>Copyright Example Industries {footer_year}. All rights reserved.</p>
          </footer>
        </body>
        </html>
        "#
    )
}

pub(crate) fn homepage_def(footer_year: &str) -> PageDef {
    let mut def = PageDef::new(homepage_html(footer_year));
    // The main heading arrives asynchronously, within the settling delay.
    def.after(400, vec![Reaction::Show("main h1".into())]);
    def.bind(
        "click",
        "[data-testid=\"search-submit\"]",
        vec![
            Reaction::QueryParamFromInput {
                param: "search".into(),
                input: "[data-testid=\"search-input\"]".into(),
            },
            Reaction::Show("[data-testid=\"search-results\"]".into()),
        ],
    );
    def.bind("click", "#nav-contact", vec![Reaction::Show("#contact".into())]);
    def.bind(
        "submit",
        "form[data-testid=\"contact-form\"]",
        vec![Reaction::Show("[data-testid=\"form-success-message\"]".into())],
    );
    def
}

/// A site that satisfies all eight standard contracts.
pub(crate) fn compliant_site() -> Site {
    let mut site = Site::new("https://app.local");
    site.route("/", homepage_def(&current_year()));
    site.image("/assets/logo.png", 320);
    site
}

pub(crate) fn compliant_browser() -> Browser {
    Browser::new(compliant_site())
}
