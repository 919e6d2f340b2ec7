//! Reading `.ts` XML into a [`TsDocument`].
//!
//! The parser is a small recursive descent over `quick-xml` pull events. It
//! is strict about the structure the lookup depends on (`<TS>` root, one
//! `<name>` per context, one `<source>` per message) and lenient about
//! everything else: unknown elements are skipped with a debug log.
//!
//! # Failure Modes
//!
//! | Failure | Behavior |
//! |---------|----------|
//! | Malformed XML | `LinguistError::Parse` with byte offset |
//! | Root element is not `<TS>` | `LinguistError::Parse` |
//! | Context without `<name>` | `LinguistError::Parse` |
//! | Message without `<source>` | `LinguistError::Parse` |
//! | Unknown `type` attribute | `LinguistError::Parse` |
//! | Unknown element | skipped |

use std::path::Path;

use quick_xml::events::{BytesStart, Event};
use quick_xml::name::QName;
use quick_xml::Reader;

use crate::error::{LinguistError, LinguistResult};
use crate::i18n::model::{
    Context, Location, Message, Translation, TranslationStatus, TranslationText, TsDocument,
    DEFAULT_TS_VERSION,
};

/// Parses a `.ts` document from a string.
///
/// # Examples
///
/// ```
/// use linguist_rs_core::i18n::parser;
///
/// let doc = parser::parse_str(r#"<?xml version="1.0" ?><!DOCTYPE TS>
/// <TS version="2.1" language="fi">
/// <context>
///     <name>BluetoothDeviceChooser</name>
///     <message>
///         <source>Scanning done</source>
///         <translation>Skannaus suoritettu</translation>
///     </message>
/// </context>
/// </TS>"#).unwrap();
///
/// assert_eq!(doc.language, "fi");
/// assert_eq!(doc.contexts[0].messages[0].source, "Scanning done");
/// ```
///
/// # Errors
///
/// Returns [`LinguistError::Parse`] if the XML is malformed or does not have
/// the structure of a translation catalogue.
pub fn parse_str(xml: &str) -> LinguistResult<TsDocument> {
    TsParser::new(xml).parse_document()
}

/// Reads and parses a `.ts` file.
///
/// # Errors
///
/// Returns [`LinguistError::Io`] if the file cannot be read, or
/// [`LinguistError::Parse`] if its contents are not a valid catalogue.
pub fn parse_file(path: impl AsRef<Path>) -> LinguistResult<TsDocument> {
    let path = path.as_ref();
    let xml = std::fs::read_to_string(path).map_err(|e| LinguistError::io(path, e))?;
    parse_str(&xml).map_err(|e| match e {
        LinguistError::Parse(msg) => {
            LinguistError::Parse(format!("{}: {msg}", path.display()))
        }
        other => other,
    })
}

struct TsParser<'a> {
    reader: Reader<&'a [u8]>,
}

impl<'a> TsParser<'a> {
    fn new(xml: &'a str) -> Self {
        let mut reader = Reader::from_str(xml);
        reader.config_mut().trim_text(false);
        Self { reader }
    }

    fn error(&self, msg: impl std::fmt::Display) -> LinguistError {
        LinguistError::Parse(format!("{msg} (at byte {})", self.reader.buffer_position()))
    }

    fn next(&mut self) -> LinguistResult<Event<'a>> {
        self.reader.read_event().map_err(|e| self.error(e))
    }

    fn skip(&mut self, start: &BytesStart<'_>) -> LinguistResult<()> {
        let name = start.name().as_ref().to_vec();
        tracing::debug!(
            element = %String::from_utf8_lossy(&name),
            "skipping unsupported element"
        );
        self.reader
            .read_to_end(QName(&name))
            .map_err(|e| self.error(e))?;
        Ok(())
    }

    fn attr(&self, start: &BytesStart<'_>, name: &str) -> LinguistResult<Option<String>> {
        let attr = start
            .try_get_attribute(name)
            .map_err(|e| self.error(e))?;
        attr.map(|a| {
            a.unescape_value()
                .map(std::borrow::Cow::into_owned)
                .map_err(|e| self.error(e))
        })
        .transpose()
    }

    fn parse_document(&mut self) -> LinguistResult<TsDocument> {
        loop {
            match self.next()? {
                Event::Start(e) if e.name().as_ref() == b"TS" => {
                    let mut doc = self.document_header(&e)?;
                    self.parse_contexts(&mut doc)?;
                    return Ok(doc);
                }
                Event::Empty(e) if e.name().as_ref() == b"TS" => {
                    return self.document_header(&e);
                }
                Event::Start(e) | Event::Empty(e) => {
                    let name = String::from_utf8_lossy(e.name().as_ref()).into_owned();
                    return Err(self.error(format!("expected <TS> root element, found <{name}>")));
                }
                Event::Eof => return Err(self.error("document has no <TS> root element")),
                _ => {}
            }
        }
    }

    fn document_header(&self, start: &BytesStart<'_>) -> LinguistResult<TsDocument> {
        Ok(TsDocument {
            version: self
                .attr(start, "version")?
                .unwrap_or_else(|| DEFAULT_TS_VERSION.to_string()),
            language: self.attr(start, "language")?.unwrap_or_default(),
            source_language: self.attr(start, "sourcelanguage")?,
            contexts: Vec::new(),
        })
    }

    fn parse_contexts(&mut self, doc: &mut TsDocument) -> LinguistResult<()> {
        loop {
            match self.next()? {
                Event::Start(e) if e.name().as_ref() == b"context" => {
                    doc.contexts.push(self.parse_context()?);
                }
                Event::Start(e) => self.skip(&e)?,
                Event::End(e) if e.name().as_ref() == b"TS" => return Ok(()),
                Event::Eof => return Err(self.error("unexpected end of document inside <TS>")),
                _ => {}
            }
        }
    }

    fn parse_context(&mut self) -> LinguistResult<Context> {
        let mut name = None;
        let mut messages = Vec::new();
        loop {
            match self.next()? {
                Event::Start(e) => match e.name().as_ref() {
                    b"name" => name = Some(self.read_text(b"name")?),
                    b"message" => messages.push(self.parse_message(&e)?),
                    _ => self.skip(&e)?,
                },
                Event::Empty(e) if e.name().as_ref() == b"name" => name = Some(String::new()),
                Event::Empty(e) if e.name().as_ref() == b"message" => {
                    return Err(self.error("message without <source>"));
                }
                Event::End(e) if e.name().as_ref() == b"context" => break,
                Event::Eof => {
                    return Err(self.error("unexpected end of document inside <context>"));
                }
                _ => {}
            }
        }
        let name = name.ok_or_else(|| self.error("context without <name>"))?;
        Ok(Context { name, messages })
    }

    fn parse_message(&mut self, start: &BytesStart<'_>) -> LinguistResult<Message> {
        let mut message = Message {
            id: self.attr(start, "id")?,
            numerus: self.attr(start, "numerus")?.as_deref() == Some("yes"),
            ..Message::default()
        };
        let mut source = None;
        let mut translation = None;

        loop {
            match self.next()? {
                Event::Start(e) => match e.name().as_ref() {
                    b"source" => source = Some(self.read_text(b"source")?),
                    b"oldsource" => message.old_source = Some(self.read_text(b"oldsource")?),
                    b"comment" => message.comment = Some(self.read_text(b"comment")?),
                    b"oldcomment" => message.old_comment = Some(self.read_text(b"oldcomment")?),
                    b"extracomment" => {
                        message.extra_comment = Some(self.read_text(b"extracomment")?);
                    }
                    b"translatorcomment" => {
                        message.translator_comment = Some(self.read_text(b"translatorcomment")?);
                    }
                    b"translation" => {
                        translation = Some(self.parse_translation(&e)?);
                    }
                    b"location" => {
                        message.locations.push(self.location(&e)?);
                        self.reader
                            .read_to_end(QName(b"location"))
                            .map_err(|err| self.error(err))?;
                    }
                    _ => self.skip(&e)?,
                },
                Event::Empty(e) => match e.name().as_ref() {
                    b"source" => source = Some(String::new()),
                    b"comment" => message.comment = Some(String::new()),
                    b"oldsource" => message.old_source = Some(String::new()),
                    b"oldcomment" => message.old_comment = Some(String::new()),
                    b"extracomment" => message.extra_comment = Some(String::new()),
                    b"translatorcomment" => message.translator_comment = Some(String::new()),
                    b"location" => message.locations.push(self.location(&e)?),
                    b"translation" => {
                        let status = self.status(&e)?;
                        let text = if message.numerus {
                            TranslationText::Plural(Vec::new())
                        } else {
                            TranslationText::default()
                        };
                        translation = Some(Translation { status, text });
                    }
                    _ => {}
                },
                Event::End(e) if e.name().as_ref() == b"message" => break,
                Event::Eof => {
                    return Err(self.error("unexpected end of document inside <message>"));
                }
                _ => {}
            }
        }

        message.source = source.ok_or_else(|| self.error("message without <source>"))?;
        message.translation = translation.unwrap_or_else(|| {
            tracing::trace!(source = %message.source, "message without <translation>");
            Translation::unfinished()
        });
        if message.numerus {
            if let TranslationText::Single(text) = &message.translation.text {
                // A plural message whose translation has no <numerusform>
                // children carries its text as the only form.
                let forms = if text.trim().is_empty() {
                    Vec::new()
                } else {
                    vec![text.clone()]
                };
                message.translation.text = TranslationText::Plural(forms);
            }
        }
        Ok(message)
    }

    fn location(&self, start: &BytesStart<'_>) -> LinguistResult<Location> {
        Ok(Location {
            filename: self.attr(start, "filename")?,
            line: self.attr(start, "line")?,
        })
    }

    fn status(&self, start: &BytesStart<'_>) -> LinguistResult<TranslationStatus> {
        self.attr(start, "type")?
            .map_or(Ok(TranslationStatus::Finished), |t| t.parse())
    }

    fn parse_translation(&mut self, start: &BytesStart<'_>) -> LinguistResult<Translation> {
        let status = self.status(start)?;
        let mut single = String::new();
        let mut forms = Vec::new();
        let mut saw_form = false;
        let mut variant: Option<String> = None;

        loop {
            match self.next()? {
                Event::Start(e) => match e.name().as_ref() {
                    b"numerusform" => {
                        saw_form = true;
                        forms.push(self.read_text(b"numerusform")?);
                    }
                    b"lengthvariant" if variant.is_none() => {
                        variant = Some(self.read_text(b"lengthvariant")?);
                    }
                    _ => self.skip(&e)?,
                },
                Event::Empty(e) => match e.name().as_ref() {
                    b"numerusform" => {
                        saw_form = true;
                        forms.push(String::new());
                    }
                    b"byte" => single.push(self.byte(&e)?),
                    _ => {}
                },
                Event::Text(t) => {
                    let text = t.unescape().map_err(|e| self.error(e))?;
                    single.push_str(&text);
                }
                Event::CData(c) => single.push_str(&String::from_utf8_lossy(&c)),
                Event::End(e) if e.name().as_ref() == b"translation" => break,
                Event::Eof => {
                    return Err(self.error("unexpected end of document inside <translation>"));
                }
                _ => {}
            }
        }

        let text = if saw_form {
            TranslationText::Plural(forms)
        } else {
            TranslationText::Single(variant.unwrap_or(single))
        };
        Ok(Translation { status, text })
    }

    /// Reads character content up to the matching end tag.
    ///
    /// `<byte value="x1b"/>` escapes are decoded. When the element holds
    /// `<lengthvariant>` children only the first one is returned.
    fn read_text(&mut self, end: &[u8]) -> LinguistResult<String> {
        let mut text = String::new();
        let mut variant: Option<String> = None;
        loop {
            match self.next()? {
                Event::Text(t) => {
                    let chunk = t.unescape().map_err(|e| self.error(e))?;
                    text.push_str(&chunk);
                }
                Event::CData(c) => text.push_str(&String::from_utf8_lossy(&c)),
                Event::Empty(e) if e.name().as_ref() == b"byte" => text.push(self.byte(&e)?),
                Event::Start(e) if e.name().as_ref() == b"lengthvariant" && variant.is_none() => {
                    variant = Some(self.read_text(b"lengthvariant")?);
                }
                Event::Start(e) => self.skip(&e)?,
                Event::End(e) if e.name().as_ref() == end => return Ok(variant.unwrap_or(text)),
                Event::End(e) => {
                    let name = String::from_utf8_lossy(e.name().as_ref()).into_owned();
                    return Err(self.error(format!(
                        "unexpected </{name}> inside <{}>",
                        String::from_utf8_lossy(end)
                    )));
                }
                Event::Eof => {
                    return Err(self.error(format!(
                        "unexpected end of document inside <{}>",
                        String::from_utf8_lossy(end)
                    )));
                }
                _ => {}
            }
        }
    }

    fn byte(&self, start: &BytesStart<'_>) -> LinguistResult<char> {
        let value = self
            .attr(start, "value")?
            .ok_or_else(|| self.error("<byte> without value"))?;
        let code = match value.strip_prefix('x').or_else(|| value.strip_prefix('X')) {
            Some(hex) => u32::from_str_radix(hex, 16),
            None => value.parse::<u32>(),
        }
        .map_err(|_| self.error(format!("invalid <byte> value '{value}'")))?;
        char::from_u32(code).ok_or_else(|| self.error(format!("invalid <byte> value '{value}'")))
    }
}
