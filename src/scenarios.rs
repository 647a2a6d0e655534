use super::*;

use chrono::{Datelike, Local};
use fancy_regex::Regex;

/// The page title carries the product name (case-sensitive containment).
pub fn title_contract(browser: &mut Browser, config: &SuiteConfig) -> Result<()> {
    browser.assert_title_contains(&config.product_name)
}

/// A visible navigation region with a visible "Home" entry; "About" and
/// "Contact" only have to be present, not visible.
pub fn navigation_contract(browser: &mut Browser, _config: &SuiteConfig) -> Result<()> {
    browser.assert_visible("nav")?;
    browser.assert_contains_visible("nav", "Home")?;
    browser.assert_contains("nav", "About")?;
    browser.assert_contains("nav", "Contact")?;
    Ok(())
}

/// A visible main region with a visible top-level heading.
pub fn main_content_contract(browser: &mut Browser, _config: &SuiteConfig) -> Result<()> {
    browser.assert_visible("main")?;
    browser.assert_visible("main h1")?;
    Ok(())
}

/// A visible footer carrying "Copyright" and the current four-digit year.
/// The year is computed at run time; a footer baked at build time goes
/// stale every January 1st, and this contract is what catches it.
///
/// The year check is plain substring containment. With
/// [`SuiteConfig::strict_year_token`] set, the year must additionally
/// stand alone as a four-digit token rather than inside a longer digit
/// run such as a phone number.
pub fn footer_contract(browser: &mut Browser, config: &SuiteConfig) -> Result<()> {
    browser.assert_visible("footer")?;
    browser.assert_contains_visible("footer", "Copyright")?;

    let year = Local::now().year().to_string();
    browser.assert_contains_visible("footer", &year)?;

    if config.strict_year_token {
        let footer_text = browser.text("footer")?;
        let pattern = format!("(?<!\\d){year}(?!\\d)");
        let standalone = Regex::new(&pattern)
            .and_then(|re| re.is_match(&footer_text))
            .map_err(|error| Error::ActionFailed {
                selector: "footer".into(),
                action: "match year".into(),
                reason: error.to_string(),
            })?;
        if !standalone {
            return Err(Error::AssertionFailed {
                subject: "footer".into(),
                expected: format!("standalone year {year}"),
                actual: footer_text,
            });
        }
    }
    Ok(())
}

/// Under a mobile viewport the mobile menu button is visible; on desktop
/// the desktop menu replaces it. Toggling back and forth must be
/// idempotent. Each viewport change is followed by a settling delay.
pub fn responsive_contract(browser: &mut Browser, config: &SuiteConfig) -> Result<()> {
    browser.set_viewport(config.mobile_viewport);
    browser.wait(config.viewport_settle_ms)?;
    browser.assert_visible("[data-testid=\"mobile-menu-button\"]")?;

    browser.set_viewport(config.desktop_viewport);
    browser.wait(config.viewport_settle_ms)?;
    browser.assert_visible("[data-testid=\"desktop-menu\"]")?;
    browser.assert_not_visible("[data-testid=\"mobile-menu-button\"]")?;

    browser.set_viewport(config.mobile_viewport);
    browser.wait(config.viewport_settle_ms)?;
    browser.assert_visible("[data-testid=\"mobile-menu-button\"]")?;
    browser.assert_not_visible("[data-testid=\"desktop-menu\"]")?;
    Ok(())
}

/// Typing a query and activating search reveals results and records the
/// percent-encoded query in the URL (spaces as `%20`).
pub fn search_contract(browser: &mut Browser, config: &SuiteConfig) -> Result<()> {
    browser.assert_visible("[data-testid=\"search-input\"]")?;
    browser.type_text("[data-testid=\"search-input\"]", &config.search_query)?;
    browser.click("[data-testid=\"search-submit\"]")?;
    browser.assert_visible("[data-testid=\"search-results\"]")?;
    browser.assert_url_contains(&format!(
        "search={}",
        url_encode_component(&config.search_query)
    ))
}

/// Every image on the page is visible and decoded to a non-zero natural
/// width; a broken `src` reports width zero and fails the scenario.
pub fn image_load_contract(browser: &mut Browser, _config: &SuiteConfig) -> Result<()> {
    let images = browser.images()?;
    if images.is_empty() {
        return Err(Error::SelectorNotFound("img".into()));
    }
    for image in images {
        let subject = format!("img[src=\"{}\"]", image.src);
        if !image.visible {
            return Err(Error::AssertionFailed {
                subject,
                expected: "visible".into(),
                actual: "hidden".into(),
            });
        }
        if image.natural_width == 0 {
            return Err(Error::AssertionFailed {
                subject,
                expected: "natural width > 0".into(),
                actual: "0 (image failed to load)".into(),
            });
        }
    }
    Ok(())
}

/// Activating the "Contact" navigation entry reveals the contact form;
/// submitting the sample name/email/message reveals the success message.
pub fn contact_form_contract(browser: &mut Browser, config: &SuiteConfig) -> Result<()> {
    browser.click_contains("nav", "Contact")?;
    browser.assert_visible("form[data-testid=\"contact-form\"]")?;

    browser.type_text("input[name=\"name\"]", &config.contact.name)?;
    browser.type_text("input[name=\"email\"]", &config.contact.email)?;
    browser.type_text("textarea[name=\"message\"]", &config.contact.message)?;

    browser.click("button[type=\"submit\"]")?;
    browser.assert_visible("[data-testid=\"form-success-message\"]")
}
