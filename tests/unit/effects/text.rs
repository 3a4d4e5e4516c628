use super::*;

#[test]
fn splits_on_every_break_variant() {
    let split = split_chars("Ab<br>c<BR/>d<br />e<Br   >f");
    assert_eq!(split.lines.len(), 5);
    assert_eq!(split.lines[0], vec![Glyph::Char('A'), Glyph::Char('b')]);
    assert_eq!(split.lines[4], vec![Glyph::Char('f')]);
}

#[test]
fn trims_lines_and_drops_empty_ones() {
    let split = split_chars("  Hello world <br>   <br> again ");
    assert_eq!(split.lines.len(), 2);
    assert_eq!(split.char_count(), 15);
    assert_eq!(split.lines[0][5], Glyph::Space);
}

#[test]
fn markup_wraps_chars_and_keeps_spaces_plain() {
    let split = split_chars("a b<br/>c");
    assert_eq!(
        split.to_markup(),
        "<span class=\"char\">a</span> <span class=\"char\">b</span><br><span class=\"char\">c</span>"
    );
}

#[test]
fn non_break_tags_are_left_as_text() {
    let split = split_chars("<b>x</b>");
    assert_eq!(split.lines.len(), 1);
    assert_eq!(split.char_count(), 8);
    assert!(split_chars("").lines.is_empty());
    assert_eq!(split_chars("a<brx>b").lines.len(), 1);
}
