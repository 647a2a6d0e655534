use super::*;

#[test]
fn parses_nested_elements_and_attributes() -> Result<()> {
    let out = parse_html(
        "<!DOCTYPE html>\
         <nav class=\"top\" data-role=primary>\
           <a href='/home'>Home</a>\
         </nav>",
    )?;
    let nav = out.dom.query_selector("nav")?.expect("nav exists");
    assert_eq!(out.dom.attr(nav, "class").as_deref(), Some("top"));
    assert_eq!(out.dom.attr(nav, "data-role").as_deref(), Some("primary"));

    let link = out.dom.query_selector("nav a")?.expect("anchor exists");
    assert_eq!(out.dom.text_content(link), "Home");
    Ok(())
}

#[test]
fn boolean_attributes_parse_without_a_value() -> Result<()> {
    let out = parse_html("<section hidden><input disabled></section>")?;
    let section = out.dom.query_selector("section")?.expect("section exists");
    assert!(out.dom.attr(section, "hidden").is_some());

    let input = out.dom.query_selector("input")?.expect("input exists");
    assert!(out.dom.element(input).expect("element").disabled);
    Ok(())
}

#[test]
fn void_tags_do_not_nest_following_content() -> Result<()> {
    let out = parse_html("<img src='/a.png'><p>after</p>")?;
    let img = out.dom.query_selector("img")?.expect("img exists");
    assert!(out.dom.nodes[img.0].children.is_empty());
    assert!(out.dom.query_selector("img p")?.is_none());
    Ok(())
}

#[test]
fn comments_and_doctype_are_skipped() -> Result<()> {
    let out = parse_html("<!-- header --><!DOCTYPE html><p>body</p><!-- footer -->")?;
    assert_eq!(out.dom.query_selector_all("p")?.len(), 1);
    Ok(())
}

#[test]
fn unclosed_comment_is_a_parse_error() {
    assert!(matches!(
        parse_html("<!-- never closed"),
        Err(Error::HtmlParse(_))
    ));
}

#[test]
fn script_bodies_are_skipped_entirely() -> Result<()> {
    let out = parse_html(
        "<script>document.querySelector('p').remove(); if (1 < 2) {}</script><p>kept</p>",
    )?;
    assert_eq!(out.dom.query_selector_all("p")?.len(), 1);
    let script = out.dom.query_selector("script")?.expect("script node kept");
    assert!(out.dom.nodes[script.0].children.is_empty());
    Ok(())
}

#[test]
fn style_bodies_feed_the_stylesheet_not_the_dom() -> Result<()> {
    let out = parse_html("<style>p { display: none; }</style><p>styled</p>")?;
    assert_eq!(out.styles.len(), 1);
    assert!(out.styles[0].contains("display: none"));
    let style = out.dom.query_selector("style")?.expect("style node kept");
    assert!(out.dom.nodes[style.0].children.is_empty());
    Ok(())
}

#[test]
fn title_text_is_raw_but_entity_decoded() -> Result<()> {
    let out = parse_html("<title>Tools &amp; Toys <b>literal</b></title>")?;
    let title = out.dom.query_selector("title")?.expect("title exists");
    assert_eq!(out.dom.text_content(title), "Tools & Toys <b>literal</b>");
    Ok(())
}

#[test]
fn textarea_body_becomes_its_value() -> Result<()> {
    let out = parse_html("<textarea name='message'>hello</textarea>")?;
    let textarea = out.dom.query_selector("textarea")?.expect("textarea exists");
    assert_eq!(out.dom.value(textarea), "hello");
    Ok(())
}

#[test]
fn character_references_decode_in_text_and_attributes() -> Result<()> {
    let out = parse_html("<p title='a &quot;b&quot;'>&copy; 2024 &#8212; x &unknown; &amp</p>")?;
    let p = out.dom.query_selector("p")?.expect("p exists");
    assert_eq!(out.dom.attr(p, "title").as_deref(), Some("a \"b\""));
    assert_eq!(out.dom.text_content(p), "© 2024 \u{2014} x &unknown; &amp");
    Ok(())
}

#[test]
fn implied_closes_for_paragraphs_and_list_items() -> Result<()> {
    let out = parse_html("<p>one<p>two<ul><li>a<li>b</ul>")?;
    assert_eq!(out.dom.query_selector_all("p")?.len(), 2);
    assert_eq!(out.dom.query_selector_all("li")?.len(), 2);
    assert!(out.dom.query_selector("p p")?.is_none());
    assert!(out.dom.query_selector("li li")?.is_none());
    Ok(())
}

#[test]
fn stray_end_tags_do_not_break_parsing() -> Result<()> {
    let out = parse_html("<div><span>x</span></b></div><p>after</p>")?;
    assert!(out.dom.query_selector("p")?.is_some());
    Ok(())
}

#[test]
fn malformed_attribute_fragments_are_skipped() -> Result<()> {
    let out = parse_html("<a href=\"\"/en/\"tools/\">link</a>")?;
    assert!(out.dom.query_selector("a")?.is_some());
    Ok(())
}
