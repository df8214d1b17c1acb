//! Style sheet (`word/styles.xml`) and list numbering (`word/numbering.xml`).

use std::fmt::Write;

use crate::model::Typography;
use crate::xml::escape;

const MAIN_NS: &str = "http://schemas.openxmlformats.org/wordprocessingml/2006/main";

/// Numbering instance used by bulleted list paragraphs.
pub(crate) const BULLET_NUM_ID: u32 = 1;
/// Numbering instance used by numbered list paragraphs.
pub(crate) const DECIMAL_NUM_ID: u32 = 2;

/// Generate `word/styles.xml` from the document typography.
pub(crate) fn styles_xml(typography: &Typography) -> String {
    let mut out = String::with_capacity(4096);
    write!(
        out,
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?><w:styles xmlns:w="{MAIN_NS}">"#
    )
    .unwrap();

    let body_font = escape(&typography.body_font);
    let code_font = escape(&typography.code_font);
    write!(
        out,
        concat!(
            "<w:docDefaults><w:rPrDefault><w:rPr>",
            r#"<w:rFonts w:ascii="{font}" w:hAnsi="{font}" w:eastAsia="{font}" w:cs="{font}"/>"#,
            r#"<w:sz w:val="{size}"/><w:szCs w:val="{size}"/>"#,
            "</w:rPr></w:rPrDefault><w:pPrDefault><w:pPr>",
            r#"<w:spacing w:after="120" w:line="259" w:lineRule="auto"/>"#,
            "</w:pPr></w:pPrDefault></w:docDefaults>"
        ),
        font = body_font,
        size = typography.body_size * 2,
    )
    .unwrap();

    paragraph_style(&mut out, "Normal", "Normal", None, "", "", true);

    paragraph_style(
        &mut out,
        "Title",
        "Title",
        Some("Normal"),
        r#"<w:spacing w:after="480"/><w:jc w:val="center"/>"#,
        &format!(
            r#"<w:b/><w:sz w:val="{0}"/><w:szCs w:val="{0}"/>"#,
            typography.title_size * 2
        ),
        false,
    );

    for (index, size) in typography.heading_sizes.iter().enumerate() {
        let level = index + 1;
        paragraph_style(
            &mut out,
            &format!("Heading{level}"),
            &format!("heading {level}"),
            Some("Normal"),
            &format!(
                r#"<w:keepNext/><w:spacing w:before="240" w:after="120"/><w:outlineLvl w:val="{index}"/>"#
            ),
            &format!(r#"<w:b/><w:sz w:val="{0}"/><w:szCs w:val="{0}"/>"#, size * 2),
            false,
        );
    }

    paragraph_style(
        &mut out,
        "CodeBlock",
        "Code Block",
        Some("Normal"),
        r#"<w:spacing w:before="120" w:after="120" w:line="240" w:lineRule="auto"/><w:ind w:left="720"/>"#,
        &format!(
            r#"<w:rFonts w:ascii="{code_font}" w:hAnsi="{code_font}" w:cs="{code_font}"/><w:sz w:val="{0}"/><w:szCs w:val="{0}"/>"#,
            typography.code_size * 2
        ),
        false,
    );

    paragraph_style(
        &mut out,
        "Quote",
        "Quote",
        Some("Normal"),
        r#"<w:spacing w:before="120" w:after="120"/><w:ind w:left="720"/>"#,
        "<w:i/>",
        false,
    );

    paragraph_style(
        &mut out,
        "ListBullet",
        "List Bullet",
        Some("Normal"),
        &format!(r#"<w:numPr><w:ilvl w:val="0"/><w:numId w:val="{BULLET_NUM_ID}"/></w:numPr>"#),
        "",
        false,
    );

    paragraph_style(
        &mut out,
        "ListNumber",
        "List Number",
        Some("Normal"),
        &format!(r#"<w:numPr><w:ilvl w:val="0"/><w:numId w:val="{DECIMAL_NUM_ID}"/></w:numPr>"#),
        "",
        false,
    );

    out.push_str(concat!(
        r#"<w:style w:type="table" w:styleId="GridTable"><w:name w:val="Table Grid"/>"#,
        r#"<w:tblPr><w:tblBorders>"#,
        r#"<w:top w:val="single" w:sz="4" w:space="0" w:color="auto"/>"#,
        r#"<w:left w:val="single" w:sz="4" w:space="0" w:color="auto"/>"#,
        r#"<w:bottom w:val="single" w:sz="4" w:space="0" w:color="auto"/>"#,
        r#"<w:right w:val="single" w:sz="4" w:space="0" w:color="auto"/>"#,
        r#"<w:insideH w:val="single" w:sz="4" w:space="0" w:color="auto"/>"#,
        r#"<w:insideV w:val="single" w:sz="4" w:space="0" w:color="auto"/>"#,
        r#"</w:tblBorders><w:tblCellMar><w:left w:w="108" w:type="dxa"/>"#,
        r#"<w:right w:w="108" w:type="dxa"/></w:tblCellMar></w:tblPr></w:style>"#
    ));

    out.push_str("</w:styles>");
    out
}

fn paragraph_style(
    out: &mut String,
    id: &str,
    name: &str,
    based_on: Option<&str>,
    paragraph_props: &str,
    run_props: &str,
    is_default: bool,
) {
    let default_attr = if is_default { r#" w:default="1""# } else { "" };
    write!(
        out,
        r#"<w:style w:type="paragraph"{default_attr} w:styleId="{id}"><w:name w:val="{name}"/>"#
    )
    .unwrap();
    if let Some(parent) = based_on {
        write!(out, r#"<w:basedOn w:val="{parent}"/><w:qFormat/>"#).unwrap();
    } else {
        out.push_str("<w:qFormat/>");
    }
    if !paragraph_props.is_empty() {
        write!(out, "<w:pPr>{paragraph_props}</w:pPr>").unwrap();
    }
    if !run_props.is_empty() {
        write!(out, "<w:rPr>{run_props}</w:rPr>").unwrap();
    }
    out.push_str("</w:style>");
}

/// Generate `word/numbering.xml` with one bullet and one decimal list.
pub(crate) fn numbering_xml() -> String {
    let mut out = String::with_capacity(1024);
    write!(
        out,
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?><w:numbering xmlns:w="{MAIN_NS}">"#
    )
    .unwrap();
    out.push_str(concat!(
        r#"<w:abstractNum w:abstractNumId="0"><w:multiLevelType w:val="singleLevel"/>"#,
        r#"<w:lvl w:ilvl="0"><w:start w:val="1"/><w:numFmt w:val="bullet"/>"#,
        "<w:lvlText w:val=\"\u{2022}\"/><w:lvlJc w:val=\"left\"/>",
        r#"<w:pPr><w:ind w:left="720" w:hanging="360"/></w:pPr></w:lvl></w:abstractNum>"#,
        r#"<w:abstractNum w:abstractNumId="1"><w:multiLevelType w:val="singleLevel"/>"#,
        r#"<w:lvl w:ilvl="0"><w:start w:val="1"/><w:numFmt w:val="decimal"/>"#,
        r#"<w:lvlText w:val="%1."/><w:lvlJc w:val="left"/>"#,
        r#"<w:pPr><w:ind w:left="720" w:hanging="360"/></w:pPr></w:lvl></w:abstractNum>"#
    ));
    write!(
        out,
        concat!(
            r#"<w:num w:numId="{bullet}"><w:abstractNumId w:val="0"/></w:num>"#,
            r#"<w:num w:numId="{decimal}"><w:abstractNumId w:val="1"/></w:num>"#
        ),
        bullet = BULLET_NUM_ID,
        decimal = DECIMAL_NUM_ID,
    )
    .unwrap();
    out.push_str("</w:numbering>");
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_styles_use_typography() {
        let typography = Typography {
            body_font: "Arial".to_owned(),
            body_size: 11,
            ..Typography::default()
        };
        let xml = styles_xml(&typography);

        assert!(xml.contains(r#"w:ascii="Arial""#));
        assert!(xml.contains(r#"<w:sz w:val="22"/>"#));
        assert!(xml.contains(r#"w:ascii="Courier New""#));
        // Title is 20pt by default.
        assert!(xml.contains(r#"<w:b/><w:sz w:val="40"/>"#));
    }

    #[test]
    fn test_styles_define_all_paragraph_styles() {
        let xml = styles_xml(&Typography::default());

        for id in [
            "Normal",
            "Title",
            "Heading1",
            "Heading5",
            "CodeBlock",
            "Quote",
            "ListBullet",
            "ListNumber",
            "GridTable",
        ] {
            assert!(
                xml.contains(&format!(r#"w:styleId="{id}""#)),
                "missing style {id}"
            );
        }
        assert!(xml.contains(r#"<w:name w:val="heading 3"/>"#));
        assert!(xml.contains(r#"<w:outlineLvl w:val="2"/>"#));
    }

    #[test]
    fn test_numbering_has_bullet_and_decimal() {
        let xml = numbering_xml();

        assert!(xml.contains(r#"<w:numFmt w:val="bullet"/>"#));
        assert!(xml.contains(r#"<w:lvlText w:val="%1."/>"#));
        assert!(xml.contains(r#"<w:num w:numId="1">"#));
        assert!(xml.contains(r#"<w:num w:numId="2">"#));
    }
}
