//! Writing a [`TsDocument`] back to `.ts` XML.
//!
//! Output follows the layout of Qt's `lupdate`: an XML declaration, a
//! `<!DOCTYPE TS>` line, four-space indentation, and all five XML special
//! characters escaped. Control characters other than tab, newline, and
//! carriage return cannot appear in XML 1.0 text and are written as
//! `<byte value="xNN"/>` elements.

use std::io::Write;
use std::path::Path;

use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;

use crate::error::{LinguistError, LinguistResult};
use crate::i18n::model::{Message, Translation, TranslationText, TsDocument};

/// Serializes a document to a string.
///
/// # Errors
///
/// Returns [`LinguistError::Serialize`] if the XML writer fails.
pub fn to_string(doc: &TsDocument) -> LinguistResult<String> {
    let mut buf = Vec::new();
    write_to(doc, &mut buf)?;
    String::from_utf8(buf).map_err(|e| LinguistError::Serialize(e.to_string()))
}

/// Serializes a document and writes it to `path`.
///
/// # Errors
///
/// Returns [`LinguistError::Io`] if the file cannot be written.
pub fn write_file(doc: &TsDocument, path: impl AsRef<Path>) -> LinguistResult<()> {
    let path = path.as_ref();
    let xml = to_string(doc)?;
    std::fs::write(path, xml).map_err(|e| LinguistError::io(path, e))?;
    tracing::debug!(path = %path.display(), "wrote catalogue");
    Ok(())
}

/// Serializes a document into any writer.
///
/// # Errors
///
/// Returns [`LinguistError::Serialize`] if writing fails.
pub fn write_to<W: Write>(doc: &TsDocument, out: W) -> LinguistResult<()> {
    let mut ts = TsWriter {
        inner: Writer::new_with_indent(out, b' ', 4),
    };
    ts.document(doc)
}

struct TsWriter<W: Write> {
    inner: Writer<W>,
}

fn serialize_err(err: impl std::fmt::Display) -> LinguistError {
    LinguistError::Serialize(err.to_string())
}

impl<W: Write> TsWriter<W> {
    fn event(&mut self, event: Event<'_>) -> LinguistResult<()> {
        self.inner.write_event(event).map_err(serialize_err)
    }

    fn document(&mut self, doc: &TsDocument) -> LinguistResult<()> {
        self.event(Event::Decl(BytesDecl::new("1.0", Some("utf-8"), None)))?;
        self.event(Event::DocType(BytesText::from_escaped("TS")))?;

        let mut root = BytesStart::new("TS");
        root.push_attribute(("version", doc.version.as_str()));
        root.push_attribute(("language", doc.language.as_str()));
        if let Some(source_language) = &doc.source_language {
            root.push_attribute(("sourcelanguage", source_language.as_str()));
        }
        self.event(Event::Start(root))?;

        for context in &doc.contexts {
            self.event(Event::Start(BytesStart::new("context")))?;
            self.text_element("name", &context.name)?;
            for message in &context.messages {
                self.message(message)?;
            }
            self.event(Event::End(BytesEnd::new("context")))?;
        }

        self.event(Event::End(BytesEnd::new("TS")))?;
        self.inner.get_mut().write_all(b"\n").map_err(serialize_err)
    }

    fn message(&mut self, message: &Message) -> LinguistResult<()> {
        let mut start = BytesStart::new("message");
        if let Some(id) = &message.id {
            start.push_attribute(("id", id.as_str()));
        }
        if message.numerus {
            start.push_attribute(("numerus", "yes"));
        }
        self.event(Event::Start(start))?;

        for location in &message.locations {
            let mut loc = BytesStart::new("location");
            if let Some(filename) = &location.filename {
                loc.push_attribute(("filename", filename.as_str()));
            }
            if let Some(line) = &location.line {
                loc.push_attribute(("line", line.as_str()));
            }
            self.event(Event::Empty(loc))?;
        }

        self.text_element("source", &message.source)?;
        self.optional_element("oldsource", message.old_source.as_deref())?;
        self.optional_element("comment", message.comment.as_deref())?;
        self.optional_element("oldcomment", message.old_comment.as_deref())?;
        self.optional_element("extracomment", message.extra_comment.as_deref())?;
        self.optional_element("translatorcomment", message.translator_comment.as_deref())?;
        self.translation(&message.translation)?;

        self.event(Event::End(BytesEnd::new("message")))
    }

    fn translation(&mut self, translation: &Translation) -> LinguistResult<()> {
        let mut start = BytesStart::new("translation");
        if let Some(kind) = translation.status.attribute() {
            start.push_attribute(("type", kind));
        }
        match &translation.text {
            TranslationText::Single(text) if text.is_empty() => self.event(Event::Empty(start)),
            TranslationText::Single(text) => {
                self.event(Event::Start(start))?;
                self.text(text)?;
                self.event(Event::End(BytesEnd::new("translation")))
            }
            TranslationText::Plural(forms) => {
                self.event(Event::Start(start))?;
                for form in forms {
                    self.text_element("numerusform", form)?;
                }
                self.event(Event::End(BytesEnd::new("translation")))
            }
        }
    }

    fn optional_element(&mut self, name: &str, text: Option<&str>) -> LinguistResult<()> {
        match text {
            Some(text) => self.text_element(name, text),
            None => Ok(()),
        }
    }

    fn text_element(&mut self, name: &str, text: &str) -> LinguistResult<()> {
        self.event(Event::Start(BytesStart::new(name)))?;
        self.text(text)?;
        self.event(Event::End(BytesEnd::new(name)))
    }

    /// Writes character content, keeping the end tag on the same line.
    fn text(&mut self, text: &str) -> LinguistResult<()> {
        if !text.contains(is_unencodable) {
            return self.event(Event::Text(BytesText::new(text)));
        }
        let mut escaped = String::with_capacity(text.len() + 16);
        let mut rest = text;
        while let Some(pos) = rest.find(is_unencodable) {
            let (head, tail) = rest.split_at(pos);
            escaped.push_str(&quick_xml::escape::escape(head));
            let mut chars = tail.chars();
            if let Some(c) = chars.next() {
                escaped.push_str(&format!("<byte value=\"x{:x}\"/>", u32::from(c)));
            }
            rest = chars.as_str();
        }
        escaped.push_str(&quick_xml::escape::escape(rest));
        self.event(Event::Text(BytesText::from_escaped(escaped)))
    }
}

fn is_unencodable(c: char) -> bool {
    u32::from(c) < 0x20 && !matches!(c, '\t' | '\n' | '\r')
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::i18n::model::{Context, Location, TranslationStatus};
    use crate::i18n::parser::parse_str;

    fn sample() -> TsDocument {
        let mut doc = TsDocument::new("fi");
        let about = doc.context_mut("About");
        about.messages.push(Message::new("Developed by", "Kehittänyt"));
        about.messages.push(Message {
            translation: Translation::unfinished(),
            ..Message::new("QField app directory", "")
        });
        let list = doc.context_mut("FeatureListForm");
        list.messages.push(
            Message::plural(
                "Successfully deleted %n feature(s)",
                vec![
                    "%n kohteen poistaminen onnistui".into(),
                    "%n kohteen poistaminen onnistui".into(),
                ],
            )
            .with_comment("0"),
        );
        doc
    }

    #[test]
    fn test_header_and_layout() {
        let xml = to_string(&sample()).unwrap();
        assert!(xml.starts_with("<?xml version=\"1.0\" encoding=\"utf-8\"?>"));
        assert!(xml.contains("<!DOCTYPE TS>"));
        assert!(xml.contains("<TS version=\"2.1\" language=\"fi\">"));
        assert!(xml.contains("\n    <context>\n        <name>About</name>"));
        assert!(xml.contains("<source>Developed by</source>"));
        assert!(xml.contains("<translation type=\"unfinished\"/>"));
        assert!(xml.contains("<message numerus=\"yes\">"));
        assert!(xml.contains("<numerusform>%n kohteen poistaminen onnistui</numerusform>"));
        assert!(xml.ends_with("</TS>\n"));
    }

    #[test]
    fn test_escapes_special_characters() {
        let mut doc = TsDocument::new("fi");
        doc.context_mut("A").messages.push(Message::new(
            "Limit the search to the field '%1'",
            "<b>Rajaa</b> \"%1\" & muut",
        ));
        let xml = to_string(&doc).unwrap();
        assert!(xml.contains("field &apos;%1&apos;"));
        assert!(xml.contains("&lt;b&gt;Rajaa&lt;/b&gt; &quot;%1&quot; &amp; muut"));
    }

    #[test]
    fn test_control_characters_as_byte_elements() {
        let mut doc = TsDocument::new("fi");
        doc.context_mut("A")
            .messages
            .push(Message::new("esc\u{1b}ape", "tab\tkept"));
        let xml = to_string(&doc).unwrap();
        assert!(xml.contains("esc<byte value=\"x1b\"/>ape"));
        assert!(xml.contains("tab\tkept"));
    }

    #[test]
    fn test_roundtrip_preserves_everything() {
        let mut doc = sample();
        doc.source_language = Some("en".into());
        doc.contexts.push(Context {
            name: "Main".into(),
            messages: vec![Message {
                id: Some("main.open".into()),
                locations: vec![Location {
                    filename: Some("main.qml".into()),
                    line: Some("12".into()),
                }],
                old_source: Some("Open...".into()),
                extra_comment: Some("toolbar".into()),
                translator_comment: Some("ok".into()),
                old_comment: Some("before".into()),
                ..Message::new("Open\n\nnow", "Avaa\n\nnyt")
                    .with_status(TranslationStatus::Vanished)
            }],
        });
        let xml = to_string(&doc).unwrap();
        let back = parse_str(&xml).unwrap();
        assert_eq!(back, doc);
    }

    #[test]
    fn test_write_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("app_fi.ts");
        write_file(&sample(), &path).unwrap();
        let back = crate::i18n::parser::parse_file(&path).unwrap();
        assert_eq!(back, sample());
    }
}
