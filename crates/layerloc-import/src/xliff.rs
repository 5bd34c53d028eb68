use layerloc_core::text::unescape_newlines;
use layerloc_core::{LayerLocError, TranslationSet, TranslationUnit};
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

#[derive(Clone, Copy)]
enum Field {
    Source,
    Target,
}

fn attr(e: &BytesStart, name: &[u8]) -> Option<String> {
    e.try_get_attribute(name)
        .ok()
        .flatten()
        .and_then(|a| a.unescape_value().ok())
        .map(|v| v.into_owned())
}

/// Read `<trans-unit>` entries from an XLIFF 1.2 document.
///
/// The key is `resname`, falling back to `id`. Literal `\n` sequences written
/// by the exporter are turned back into line feeds.
pub fn parse_xliff(xml: &str) -> Result<TranslationSet, LayerLocError> {
    let mut reader = Reader::from_str(xml);

    let mut set = TranslationSet::new();
    let mut key: Option<String> = None;
    let mut source: Option<String> = None;
    let mut target: Option<String> = None;
    let mut field: Option<Field> = None;
    let mut buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(e)) => match e.name().as_ref() {
                b"trans-unit" => {
                    key = attr(&e, b"resname").or_else(|| attr(&e, b"id"));
                    source = None;
                    target = None;
                }
                b"source" if key.is_some() => {
                    field = Some(Field::Source);
                    source.get_or_insert_with(String::new);
                }
                b"target" if key.is_some() => {
                    field = Some(Field::Target);
                    target.get_or_insert_with(String::new);
                }
                _ => {}
            },
            Ok(Event::Text(t)) => {
                if let Some(f) = field {
                    let text = t
                        .unescape()
                        .map_err(|e| LayerLocError::InvalidTranslations(format!("xliff: {e}")))?;
                    let slot = match f {
                        Field::Source => &mut source,
                        Field::Target => &mut target,
                    };
                    slot.get_or_insert_with(String::new).push_str(&text);
                }
            }
            Ok(Event::CData(c)) => {
                if let Some(f) = field {
                    let slot = match f {
                        Field::Source => &mut source,
                        Field::Target => &mut target,
                    };
                    slot.get_or_insert_with(String::new)
                        .push_str(&String::from_utf8_lossy(&c));
                }
            }
            Ok(Event::End(e)) => match e.name().as_ref() {
                b"source" | b"target" => field = None,
                b"trans-unit" => {
                    if let (Some(k), Some(s)) = (key.take(), source.take()) {
                        set.push(
                            k,
                            TranslationUnit {
                                source: unescape_newlines(&s),
                                target: target.take().map(|t| unescape_newlines(&t)),
                            },
                        );
                    }
                    field = None;
                }
                _ => {}
            },
            Ok(Event::Eof) => break,
            Err(e) => {
                return Err(LayerLocError::InvalidTranslations(format!(
                    "xliff at byte {}: {e}",
                    reader.buffer_position()
                )))
            }
            _ => {}
        }
        buf.clear();
    }

    Ok(set)
}

#[cfg(test)]
mod tests {
    use super::*;

    const DOC: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<xliff version="1.2" xmlns="urn:oasis:names:tc:xliff:document:1.2">
<file original="x" source-language="en-US" target-language="fr-FR" datatype="plaintext">
<header>
</header>
<body>

<trans-unit resname="A-0">
<source>Hi\nThere</source>
<target>Salut\nToi</target>
</trans-unit>

<trans-unit id="B-1">
<source>Fish &amp; Chips</source>
<target></target>
</trans-unit>

<trans-unit resname="C-2">
<source><![CDATA[<b>Bold</b>]]></source>
</trans-unit>

</body>
</file>
</xliff>"#;

    #[test]
    fn reads_units_in_document_order() {
        let set = parse_xliff(DOC).unwrap();
        let keys: Vec<_> = set.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["A-0", "B-1", "C-2"]);
    }

    #[test]
    fn restores_newlines_and_entities() {
        let set = parse_xliff(DOC).unwrap();
        let a = &set.group("A-0").unwrap()[0];
        assert_eq!(a.source, "Hi\nThere");
        assert_eq!(a.translated(), Some("Salut\nToi"));

        let b = &set.group("B-1").unwrap()[0];
        assert_eq!(b.source, "Fish & Chips");
        assert_eq!(b.translated(), None);
    }

    #[test]
    fn cdata_source_is_kept_verbatim() {
        let set = parse_xliff(DOC).unwrap();
        let c = &set.group("C-2").unwrap()[0];
        assert_eq!(c.source, "<b>Bold</b>");
        assert_eq!(c.target, None);
    }

    #[test]
    fn broken_markup_is_an_error() {
        let err = parse_xliff("<xliff><trans-unit resname=\"a\"><source>x</target></xliff>");
        assert!(matches!(err, Err(LayerLocError::InvalidTranslations(_))));
    }
}
