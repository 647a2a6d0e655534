use super::*;

fn dom_of(html: &str) -> Dom {
    parse_html(html).expect("fixture html parses").dom
}

#[test]
fn query_selector_matches_tags_ids_and_classes() -> Result<()> {
    let dom = dom_of(
        "<div id='wrap' class='outer box'>\
           <p class='note'>one</p>\
           <p>two</p>\
         </div>",
    );

    assert!(dom.query_selector("#wrap")?.is_some());
    assert!(dom.query_selector(".note")?.is_some());
    assert!(dom.query_selector("div.outer.box")?.is_some());
    assert_eq!(dom.query_selector_all("p")?.len(), 2);
    assert!(dom.query_selector("span")?.is_none());
    Ok(())
}

#[test]
fn descendant_and_child_combinators() -> Result<()> {
    let dom = dom_of(
        "<main><section><h1>deep</h1></section></main>\
         <h1>shallow</h1>",
    );

    assert_eq!(dom.query_selector_all("main h1")?.len(), 1);
    assert_eq!(dom.query_selector_all("main > section > h1")?.len(), 1);
    assert!(dom.query_selector("main > h1")?.is_none());
    Ok(())
}

#[test]
fn attribute_selectors_cover_the_test_hook_vocabulary() -> Result<()> {
    let dom = dom_of(
        "<button data-testid='mobile-menu-button' type='button'>Menu</button>\
         <input name='email' type='email'>\
         <form data-testid='contact-form'></form>",
    );

    assert!(dom.query_selector("[data-testid=\"mobile-menu-button\"]")?.is_some());
    assert!(dom.query_selector("[data-testid='mobile-menu-button']")?.is_some());
    assert!(dom.query_selector("input[name=\"email\"]")?.is_some());
    assert!(dom.query_selector("form[data-testid=\"contact-form\"]")?.is_some());
    assert!(dom.query_selector("[data-testid^=\"mobile\"]")?.is_some());
    assert!(dom.query_selector("[data-testid$=\"form\"]")?.is_some());
    assert!(dom.query_selector("[data-testid*=\"menu\"]")?.is_some());
    assert!(dom.query_selector("[data-testid]")?.is_some());
    assert!(dom.query_selector("[data-testid=\"nope\"]")?.is_none());
    Ok(())
}

#[test]
fn selector_groups_union_their_matches() -> Result<()> {
    let dom = dom_of("<nav></nav><main></main><footer></footer>");
    assert_eq!(dom.query_selector_all("nav, footer")?.len(), 2);
    Ok(())
}

#[test]
fn unsupported_selector_syntax_is_rejected() {
    let dom = dom_of("<p>x</p>");
    assert!(matches!(
        dom.query_selector("p:first-child"),
        Err(Error::UnsupportedSelector(_))
    ));
    assert!(matches!(
        dom.query_selector("p + p"),
        Err(Error::UnsupportedSelector(_))
    ));
    assert!(matches!(
        dom.query_selector(""),
        Err(Error::UnsupportedSelector(_))
    ));
}

#[test]
fn text_content_concatenates_descendant_text() {
    let dom = dom_of("<footer><p>Copyright <span>2024</span>.</p></footer>");
    let footer = dom.query_selector("footer").unwrap().unwrap();
    assert_eq!(dom.text_content(footer), "Copyright 2024.");
}

#[test]
fn find_by_text_returns_the_deepest_match() {
    let dom = dom_of(
        "<nav><ul><li><a id='c' href='/contact'>Contact</a></li><li>Home</li></ul></nav>",
    );
    let nav = dom.query_selector("nav").unwrap().unwrap();
    let matches = dom.find_by_text(nav, "Contact");
    assert_eq!(matches.len(), 1);
    assert_eq!(dom.attr(matches[0], "id").as_deref(), Some("c"));
}

#[test]
fn find_by_text_normalizes_unicode_forms() {
    // Composed e-acute in the document, decomposed in the needle.
    let dom = dom_of("<p>caf\u{00E9}</p>");
    let root = dom.root;
    assert_eq!(dom.find_by_text(root, "cafe\u{0301}").len(), 1);
}

#[test]
fn id_index_fast_path_agrees_with_full_scan() -> Result<()> {
    let dom = dom_of("<div id='a'><span id='b'></span></div>");
    assert_eq!(dom.query_selector("#b")?, dom.by_id("b"));
    Ok(())
}
