use alt::{FormatFlags, Html, Markdown, Segment, write_segment};
use pretty_assertions::assert_eq;
use pulldown_cmark::{Event, Options, Parser as CmarkParser, Tag, TagEnd};
use rstest::rstest;

fn html_tag_flag(name: &str) -> FormatFlags {
    match name {
        "i" => FormatFlags::ITALIC,
        "b" => FormatFlags::BOLD,
        "u" => FormatFlags::UNDERLINE,
        "s" => FormatFlags::STRIKETHROUGH,
        "mark" => FormatFlags::HIGHLIGHT,
        other => panic!("unexpected tag <{other}>"),
    }
}

/// Walk HTML tags and return each text run with the flags of the tags
/// enclosing it. Panics on badly nested tags.
fn html_runs(html: &str) -> Vec<(FormatFlags, String)> {
    let mut stack: Vec<FormatFlags> = Vec::new();
    let mut runs = Vec::new();
    let mut rest = html;
    while !rest.is_empty() {
        if let Some(after) = rest.strip_prefix('<') {
            let end = after.find('>').expect("unclosed tag");
            let tag = &after[..end];
            match tag.strip_prefix('/') {
                Some(name) => assert_eq!(stack.pop(), Some(html_tag_flag(name))),
                None => stack.push(html_tag_flag(tag)),
            }
            rest = &after[end + 1..];
        } else {
            let end = rest.find('<').unwrap_or(rest.len());
            let flags = stack.iter().fold(FormatFlags::empty(), |acc, f| acc | *f);
            runs.push((flags, rest[..end].to_string()));
            rest = &rest[end..];
        }
    }
    assert!(stack.is_empty(), "unclosed tags in {html}");
    runs
}

fn markdown_runs(markdown: &str) -> Vec<(FormatFlags, String)> {
    let mut stack: Vec<FormatFlags> = Vec::new();
    let mut runs = Vec::new();
    for event in CmarkParser::new_ext(markdown, Options::ENABLE_STRIKETHROUGH) {
        match event {
            Event::Start(Tag::Emphasis) => stack.push(FormatFlags::ITALIC),
            Event::Start(Tag::Strong) => stack.push(FormatFlags::BOLD),
            Event::Start(Tag::Strikethrough) => stack.push(FormatFlags::STRIKETHROUGH),
            Event::End(TagEnd::Emphasis | TagEnd::Strong | TagEnd::Strikethrough) => {
                stack.pop();
            }
            Event::Text(text) => {
                let flags = stack.iter().fold(FormatFlags::empty(), |acc, f| acc | *f);
                runs.push((flags, text.into_string()));
            }
            _ => {}
        }
    }
    runs
}

fn render_one<M: alt::Markup>(segment: &Segment, markup: &M) -> String {
    let mut out = Vec::new();
    write_segment(segment, markup, &mut out).unwrap();
    String::from_utf8(out).unwrap()
}

#[test]
fn html_contains_italic_tags() {
    let html = String::from_utf8(alt::render_string("hello ((world))", "html").unwrap()).unwrap();
    assert!(html.contains("<i>"), "no <i> in {html}");
    assert!(html.contains("</i>"), "no </i> in {html}");
    assert_eq!(html, "hello <i>world</i>");
}

#[test]
fn markdown_contains_bold_markers() {
    let md = String::from_utf8(alt::render_string_markdown("hello (*world*)", "md").unwrap())
        .unwrap();
    assert_eq!(md, "hello **world**");
}

#[test]
fn markdown_never_emits_highlight() {
    let md = String::from_utf8(alt::render_string_markdown("(|note|) ((it))", "md").unwrap())
        .unwrap();
    assert_eq!(md, "note *it*");
}

#[test]
fn marker_order_is_fixed() {
    let html = String::from_utf8(
        alt::render_string("(|a((b(-c(_d(*e*)", "order").unwrap(),
    )
    .unwrap();
    assert!(
        html.ends_with("<i><b><u><s><mark>e</mark></s></u></b></i>"),
        "{html}"
    );
}

#[test]
fn html_round_trip_keeps_flags() {
    let input = "plain (*bold ((both))*) (|hi|)(_under (-struck-)_) ((it)) (no)";
    for segment in alt::parse(input, "roundtrip").unwrap() {
        if segment.text.is_empty() {
            continue;
        }
        let html = render_one(&segment, &Html);
        assert_eq!(
            html_runs(&html),
            vec![(segment.flags, segment.text.clone())],
            "segment {segment:?}"
        );
    }
}

#[rstest]
#[case(FormatFlags::ITALIC)]
#[case(FormatFlags::BOLD)]
#[case(FormatFlags::STRIKETHROUGH)]
#[case(FormatFlags::ITALIC | FormatFlags::BOLD)]
#[case(FormatFlags::ITALIC | FormatFlags::STRIKETHROUGH)]
#[case(FormatFlags::BOLD | FormatFlags::STRIKETHROUGH)]
#[case(FormatFlags::ITALIC | FormatFlags::BOLD | FormatFlags::STRIKETHROUGH)]
fn markdown_round_trip_keeps_flags(#[case] flags: FormatFlags) {
    let segment = Segment {
        flags,
        text: "word".to_string(),
        location: alt::Location::start("md"),
        disables: FormatFlags::empty(),
    };
    let md = render_one(&segment, &Markdown);
    assert_eq!(markdown_runs(&md), vec![(flags, "word".to_string())], "{md}");
}

#[test]
fn render_file_matches_render_string() {
    let input = "a (*b*) c ((d))";
    let from_reader = alt::render_file(input.as_bytes(), "file").unwrap();
    let from_string = alt::render_string(input, "file").unwrap();
    assert_eq!(from_reader, from_string);
    assert_eq!(
        alt::render_file_markdown(input.as_bytes(), "file").unwrap(),
        b"a **b** c *d*".to_vec()
    );
}

#[test]
fn render_error_carries_location() {
    let err = alt::render_string("fine\nstill fine (/never", "page.alt").unwrap_err();
    let location = err.location().expect("parser errors have a location");
    assert_eq!((location.line, location.column), (2, 12));
    assert_eq!(err.to_string(), "page.alt:2:12 - unterminated italic group");
}
