//! Minimal XML emission
//!
//! `XmlBuilder` appends tags and escaped text to a single `String`. It takes
//! `&mut self` everywhere, so one builder has exactly one writer; concurrent
//! renderers each own their own builder.

use quick_xml::escape::escape;

const DECLARATION: &str = r#"<?xml version="1.0" encoding="UTF-8"?>"#;

#[derive(Debug, Default)]
pub struct XmlBuilder {
    buf: String,
}

impl XmlBuilder {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            buf: String::with_capacity(capacity),
        }
    }

    pub fn declaration(&mut self) -> &mut Self {
        self.buf.push_str(DECLARATION);
        self
    }

    pub fn open_tag(&mut self, name: &str) -> &mut Self {
        self.buf.push('<');
        self.buf.push_str(name);
        self.buf.push('>');
        self
    }

    /// Open a tag with attributes, emitted in the given order with escaped values
    pub fn open_tag_with_attributes(&mut self, name: &str, attrs: &[(&str, &str)]) -> &mut Self {
        self.buf.push('<');
        self.buf.push_str(name);
        for &(key, value) in attrs {
            self.buf.push(' ');
            self.buf.push_str(key);
            self.buf.push_str("=\"");
            self.buf.push_str(&escape(value));
            self.buf.push('"');
        }
        self.buf.push('>');
        self
    }

    pub fn close_tag(&mut self, name: &str) -> &mut Self {
        self.buf.push_str("</");
        self.buf.push_str(name);
        self.buf.push('>');
        self
    }

    pub fn write_escaped_text(&mut self, value: &str) -> &mut Self {
        self.buf.push_str(&escape(value));
        self
    }

    /// Splice already-serialized XML without escaping it
    pub fn write_raw(&mut self, xml: &str) -> &mut Self {
        self.buf.push_str(xml);
        self
    }

    /// Write `<name>value</name>`, or nothing at all when `value` is empty
    pub fn write_tag_if_non_empty(&mut self, name: &str, value: &str) -> &mut Self {
        if value.is_empty() {
            return self;
        }
        self.open_tag(name).write_escaped_text(value).close_tag(name)
    }

    pub fn scoped_tag(&mut self, name: &str, body: impl FnOnce(&mut Self)) -> &mut Self {
        self.open_tag(name);
        body(self);
        self.close_tag(name)
    }

    pub fn scoped_tag_with_attributes(
        &mut self,
        name: &str,
        attrs: &[(&str, &str)],
        body: impl FnOnce(&mut Self),
    ) -> &mut Self {
        self.open_tag_with_attributes(name, attrs);
        body(self);
        self.close_tag(name)
    }

    /// Fallible variant of [`XmlBuilder::scoped_tag`]. The closing tag is
    /// written before `body`'s error is returned.
    pub fn try_scoped_tag<T, E>(
        &mut self,
        name: &str,
        body: impl FnOnce(&mut Self) -> Result<T, E>,
    ) -> Result<T, E> {
        self.open_tag(name);
        let result = body(self);
        self.close_tag(name);
        result
    }

    pub fn finish(self) -> String {
        self.buf
    }
}
