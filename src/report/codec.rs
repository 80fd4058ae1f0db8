use quick_xml::events::{BytesCData, BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::{Reader, Writer};
use std::io::Write;

use super::{Element, Error};

/// Decodes XML text into a document node whose children hold the root
/// element. Repeated same-named children collapse into one keyed collection,
/// so relative order between differently-named siblings follows the first
/// appearance of each name.
pub fn parse(text: &str) -> Result<Element, Error> {
    let mut reader = Reader::from_reader(text.as_bytes());
    reader.trim_text(true);

    let mut document = Element::new();
    let mut stack: Vec<(String, Element)> = Vec::new();
    let mut buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(tag)) => {
                let (name, element) = open_element(&tag)?;
                stack.push((name, element));
            }
            Ok(Event::Empty(tag)) => {
                let (name, element) = open_element(&tag)?;
                attach(&mut document, &mut stack, name, element);
            }
            Ok(Event::End(_)) => {
                if let Some((name, element)) = stack.pop() {
                    attach(&mut document, &mut stack, name, element);
                }
            }
            Ok(Event::Text(content)) => {
                if let Some((_, element)) = stack.last_mut() {
                    let unescaped = content.unescape()?;
                    if !unescaped.is_empty() {
                        element
                            .text
                            .get_or_insert_with(String::new)
                            .push_str(&unescaped);
                    }
                }
            }
            Ok(Event::CData(content)) => {
                if let Some((_, element)) = stack.last_mut() {
                    let raw = String::from_utf8(content.into_inner().into_owned())?;
                    element
                        .cdata
                        .get_or_insert_with(String::new)
                        .push_str(&raw);
                }
            }
            Ok(Event::Eof) => break,
            Ok(_) => {}
            Err(err) => return Err(Error::from(err)),
        }
        buf.clear();
    }

    Ok(document)
}

/// Encodes a document node back to XML text. Attribute values and text are
/// escaped here and nowhere else; CDATA content is emitted verbatim.
pub fn serialize(document: &Element) -> Result<String, Error> {
    let mut writer = Writer::new(Vec::new());
    writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;

    for (name, children) in &document.children {
        for element in children.iter() {
            write_element(&mut writer, name, element)?;
        }
    }

    Ok(String::from_utf8(writer.into_inner())?)
}

fn open_element(tag: &BytesStart) -> Result<(String, Element), Error> {
    let name = String::from_utf8_lossy(tag.name().as_ref()).into_owned();
    let mut element = Element::new();
    for attribute in tag.attributes() {
        let attribute = attribute?;
        let key = String::from_utf8_lossy(attribute.key.as_ref()).into_owned();
        let value = attribute.unescape_value()?.into_owned();
        element.attributes.insert(key, value);
    }
    Ok((name, element))
}

fn attach(
    document: &mut Element,
    stack: &mut Vec<(String, Element)>,
    name: String,
    element: Element,
) {
    match stack.last_mut() {
        Some((_, parent)) => parent.append_child(name, element),
        None => document.append_child(name, element),
    }
}

fn write_element<W: Write>(
    writer: &mut Writer<W>,
    name: &str,
    element: &Element,
) -> Result<(), Error> {
    let mut start = BytesStart::new(name);
    for (key, value) in &element.attributes {
        start.push_attribute((key.as_str(), value.as_str()));
    }

    if element.text.is_none() && element.cdata.is_none() && element.children.is_empty() {
        writer.write_event(Event::Empty(start))?;
        return Ok(());
    }

    writer.write_event(Event::Start(start))?;
    if let Some(cdata) = &element.cdata {
        writer.write_event(Event::CData(BytesCData::new(cdata.as_str())))?;
    }
    if let Some(text) = &element.text {
        writer.write_event(Event::Text(BytesText::new(text.as_str())))?;
    }
    for (child_name, children) in &element.children {
        for child in children.iter() {
            write_element(writer, child_name, child)?;
        }
    }
    writer.write_event(Event::End(BytesEnd::new(name)))?;

    Ok(())
}
