use super::*;

#[test]
fn visit_rebuilds_a_fresh_page() -> Result<()> {
    let mut browser = compliant_browser();

    browser.visit("/")?;
    browser.type_text("[data-testid=\"search-input\"]", "leftover")?;
    browser.click("[data-testid=\"search-submit\"]")?;
    assert!(browser.is_visible("[data-testid=\"search-results\"]")?);

    browser.visit("/")?;
    assert_eq!(browser.value("[data-testid=\"search-input\"]")?, "");
    assert!(!browser.is_visible("[data-testid=\"search-results\"]")?);
    assert_eq!(browser.url()?, "https://app.local/");
    Ok(())
}

#[test]
fn visit_unknown_route_is_a_page_load_error() {
    let mut browser = compliant_browser();
    assert_eq!(
        browser.visit("/nope"),
        Err(Error::PageLoad("/nope".into()))
    );
}

#[test]
fn wait_fires_due_timers_in_order() -> Result<()> {
    let mut site = Site::new("https://app.local");
    let mut def = PageDef::new("<p id='status'>pending</p>");
    def.after(300, vec![Reaction::SetText {
        selector: "#status".into(),
        text: "first".into(),
    }]);
    def.after(300, vec![Reaction::SetText {
        selector: "#status".into(),
        text: "second".into(),
    }]);
    def.after(800, vec![Reaction::SetText {
        selector: "#status".into(),
        text: "third".into(),
    }]);
    site.route("/", def);

    let mut browser = Browser::new(site);
    browser.visit("/")?;

    browser.wait(100)?;
    assert_eq!(browser.text("#status")?, "pending");

    // Same due time: insertion order decides.
    browser.wait(250)?;
    assert_eq!(browser.text("#status")?, "second");

    browser.wait(500)?;
    assert_eq!(browser.text("#status")?, "third");
    Ok(())
}

#[test]
fn timers_do_not_survive_a_reload() -> Result<()> {
    let mut site = Site::new("https://app.local");
    let mut def = PageDef::new("<p id='status'>pending</p>");
    def.after(200, vec![Reaction::SetText {
        selector: "#status".into(),
        text: "done".into(),
    }]);
    site.route("/", def);

    let mut browser = Browser::new(site);
    browser.visit("/")?;
    browser.wait(150)?;
    browser.visit("/")?;
    browser.wait(150)?;
    assert_eq!(browser.text("#status")?, "pending");
    browser.wait(100)?;
    assert_eq!(browser.text("#status")?, "done");
    Ok(())
}

#[test]
fn anchor_click_navigates_when_nothing_handles_it() -> Result<()> {
    let mut site = Site::new("https://app.local");
    site.route("/", PageDef::new("<a href='/about'>About us</a>"));
    site.route("/about", PageDef::new("<h1>About</h1>"));

    let mut browser = Browser::new(site);
    browser.visit("/")?;
    browser.click("a")?;
    assert_eq!(browser.url()?, "https://app.local/about");
    browser.assert_exists("h1")?;
    Ok(())
}

#[test]
fn bound_anchor_click_suppresses_navigation() -> Result<()> {
    let mut site = Site::new("https://app.local");
    let mut def = PageDef::new("<a id='toggle' href='/other'>Toggle</a><p id='panel' hidden>hi</p>");
    def.bind("click", "#toggle", vec![Reaction::Show("#panel".into())]);
    site.route("/", def);

    let mut browser = Browser::new(site);
    browser.visit("/")?;
    browser.click("#toggle")?;
    assert_eq!(browser.url()?, "https://app.local/");
    assert!(browser.is_visible("#panel")?);
    Ok(())
}

#[test]
fn navigate_reaction_loads_the_target_route() -> Result<()> {
    let mut site = Site::new("https://app.local");
    let mut def = PageDef::new("<button id='go'>Go</button>");
    def.bind("click", "#go", vec![Reaction::Navigate("/next".into())]);
    site.route("/", def);
    site.route("/next", PageDef::new("<h1>Next</h1>"));

    let mut browser = Browser::new(site);
    browser.visit("/")?;
    browser.click("#go")?;
    assert_eq!(browser.url()?, "https://app.local/next");
    Ok(())
}

#[test]
fn submit_button_click_dispatches_submit_on_the_form() -> Result<()> {
    let mut site = Site::new("https://app.local");
    let mut def = PageDef::new(
        "<form id='f'><input name='q'><button type='submit'>Send</button></form>\
         <p id='done' hidden>sent</p>",
    );
    def.bind("submit", "#f", vec![Reaction::Show("#done".into())]);
    site.route("/", def);

    let mut browser = Browser::new(site);
    browser.visit("/")?;
    browser.click("button[type=\"submit\"]")?;
    assert!(browser.is_visible("#done")?);
    Ok(())
}

#[test]
fn clicking_a_disabled_control_is_an_action_failure() {
    let mut site = Site::new("https://app.local");
    site.route("/", PageDef::new("<button id='b' disabled>Go</button>"));

    let mut browser = Browser::new(site);
    browser.visit("/").unwrap();
    assert!(matches!(
        browser.click("#b"),
        Err(Error::ActionFailed { .. })
    ));
}

#[test]
fn typing_into_a_div_is_an_action_failure() {
    let mut site = Site::new("https://app.local");
    site.route("/", PageDef::new("<div id='d'>text</div>"));

    let mut browser = Browser::new(site);
    browser.visit("/").unwrap();
    assert!(matches!(
        browser.type_text("#d", "hello"),
        Err(Error::ActionFailed { .. })
    ));
}

#[test]
fn type_text_sets_the_value_and_fires_input_bindings() -> Result<()> {
    let mut site = Site::new("https://app.local");
    let mut def = PageDef::new("<input id='q'><p id='echo'></p>");
    def.bind("input", "#q", vec![Reaction::SetText {
        selector: "#echo".into(),
        text: "typed".into(),
    }]);
    site.route("/", def);

    let mut browser = Browser::new(site);
    browser.visit("/")?;
    browser.type_text("#q", "hello")?;
    assert_eq!(browser.value("#q")?, "hello");
    assert_eq!(browser.text("#echo")?, "typed");
    Ok(())
}

#[test]
fn trace_log_records_activity_when_enabled() -> Result<()> {
    let mut browser = compliant_browser();
    browser.set_trace_enabled(true);
    browser.visit("/")?;
    browser.wait(500)?;
    browser.click("[data-testid=\"search-submit\"]")?;

    let logs = browser.take_trace_logs();
    assert!(logs.iter().any(|line| line.starts_with("[visit] /")));
    assert!(logs.iter().any(|line| line.starts_with("[timer] waited=500")));
    assert!(logs.iter().any(|line| line.starts_with("[click]")));
    assert!(browser.take_trace_logs().is_empty());
    Ok(())
}

#[test]
fn actions_without_a_page_are_page_load_errors() {
    let mut browser = Browser::new(Site::new("https://app.local"));
    assert!(matches!(browser.wait(10), Err(Error::PageLoad(_))));
    assert!(matches!(browser.title(), Err(Error::PageLoad(_))));
    assert!(matches!(browser.click("a"), Err(Error::PageLoad(_))));
}

#[test]
fn click_contains_picks_the_visible_match() -> Result<()> {
    let mut site = Site::new("https://app.local");
    let mut def = PageDef::new(
        "<nav>\
           <a id='hidden-contact' href='/a' hidden>Contact</a>\
           <a id='visible-contact' href='/b'>Contact</a>\
         </nav><p id='panel' hidden>form</p>",
    );
    def.bind("click", "#visible-contact", vec![Reaction::Show("#panel".into())]);
    site.route("/", def);

    let mut browser = Browser::new(site);
    browser.visit("/")?;
    browser.click_contains("nav", "Contact")?;
    assert!(browser.is_visible("#panel")?);
    Ok(())
}
