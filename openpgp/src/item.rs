//! The report tree.

use std::fmt;

use serde::{Serialize, Serializer};

/// Formats `data` as lowercase hex without separators.
pub(crate) fn to_hex(data: &[u8]) -> String {
    let mut s = String::with_capacity(2 * data.len());
    for b in data {
        s.push_str(&format!("{:02x}", b));
    }
    s
}

/// Raw bytes attached to an [`Item`].
///
/// Rendered as space separated lowercase hex.  A grouped dump is
/// broken into rows of 16 bytes, with a wider gap after the eighth.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Dump {
    data: Vec<u8>,
    grouped: bool,
}

impl Dump {
    /// Returns a dump of `data` on a single line.
    pub fn new<D: Into<Vec<u8>>>(data: D) -> Self {
        Dump { data: data.into(), grouped: false }
    }

    /// Returns a dump of `data` in rows of 16 bytes.
    pub fn grouped<D: Into<Vec<u8>>>(data: D) -> Self {
        Dump { data: data.into(), grouped: true }
    }

    /// Returns the dumped bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    /// Returns whether the dump is empty.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

impl fmt::Display for Dump {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for (i, b) in self.data.iter().enumerate() {
            if i > 0 {
                if ! self.grouped {
                    f.write_str(" ")?;
                } else if i % 16 == 0 {
                    f.write_str("\n")?;
                } else if i % 8 == 0 {
                    f.write_str("  ")?;
                } else {
                    f.write_str(" ")?;
                }
            }
            write!(f, "{:02x}", b)?;
        }
        Ok(())
    }
}

impl Serialize for Dump {
    fn serialize<S: Serializer>(&self, serializer: S)
                                -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// A node of the report.
///
/// An item has a name, an optional value, an optional note and an
/// optional [`Dump`], followed by any number of children, in the order
/// they were decoded.  An item with only a name is a valid group
/// label.
///
/// The text rendering (`Display`) is `name: value (note)` on one line,
/// the dump on the next line(s), and the children, each indented by
/// one tab per level.  The serde representation uses the keys `name`,
/// `value`, `dump`, `note` and `Item`, omitting empty fields.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Item {
    name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    value: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    dump: Option<Dump>,
    #[serde(skip_serializing_if = "Option::is_none")]
    note: Option<String>,
    #[serde(rename = "Item", skip_serializing_if = "Vec::is_empty")]
    children: Vec<Item>,
}

impl Item {
    /// Returns an item with just a name.
    pub fn new<N: Into<String>>(name: N) -> Self {
        Item {
            name: name.into(),
            value: None,
            dump: None,
            note: None,
            children: Vec::new(),
        }
    }

    /// Sets the value.
    pub fn with_value<V: Into<String>>(mut self, value: V) -> Self {
        self.set_value(value);
        self
    }

    /// Sets the note.
    pub fn with_note<N: Into<String>>(mut self, note: N) -> Self {
        self.note = Some(note.into());
        self
    }

    /// Sets the dump.
    ///
    /// Empty dumps are dropped.
    pub fn with_dump(mut self, dump: Option<Dump>) -> Self {
        self.set_dump(dump);
        self
    }

    /// Returns the name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the value, if any.
    pub fn value(&self) -> Option<&str> {
        self.value.as_deref()
    }

    /// Returns the note, if any.
    pub fn note(&self) -> Option<&str> {
        self.note.as_deref()
    }

    /// Returns the dump, if any.
    pub fn dump(&self) -> Option<&Dump> {
        self.dump.as_ref()
    }

    /// Returns the children.
    pub fn children(&self) -> &[Item] {
        &self.children
    }

    /// Returns the first child called `name`.
    pub fn child(&self, name: &str) -> Option<&Item> {
        self.children.iter().find(|c| c.name == name)
    }

    /// Replaces the value.
    pub fn set_value<V: Into<String>>(&mut self, value: V) {
        self.value = Some(value.into());
    }

    /// Replaces the note.
    pub fn set_note(&mut self, note: Option<String>) {
        self.note = note;
    }

    /// Replaces the dump.
    ///
    /// Empty dumps are dropped.
    pub fn set_dump(&mut self, dump: Option<Dump>) {
        self.dump = dump.filter(|d| ! d.is_empty());
    }

    /// Appends a child.
    pub fn push(&mut self, child: Item) {
        self.children.push(child);
    }

    pub(crate) fn children_mut(&mut self) -> &mut Vec<Item> {
        &mut self.children
    }

    fn render(&self, f: &mut fmt::Formatter, depth: usize) -> fmt::Result {
        indent(f, depth)?;
        f.write_str(&self.name)?;
        if let Some(value) = self.value.as_ref() {
            write!(f, ": {}", value)?;
        }
        if let Some(note) = self.note.as_ref() {
            write!(f, " ({})", note)?;
        }
        f.write_str("\n")?;

        if let Some(dump) = self.dump.as_ref() {
            for line in dump.to_string().lines() {
                indent(f, depth + 1)?;
                writeln!(f, "{}", line)?;
            }
        }

        for child in self.children.iter() {
            child.render(f, depth + 1)?;
        }
        Ok(())
    }
}

fn indent(f: &mut fmt::Formatter, depth: usize) -> fmt::Result {
    for _ in 0..depth {
        f.write_str("\t")?;
    }
    Ok(())
}

impl fmt::Display for Item {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        self.render(f, 0)
    }
}

/// The dump of a packet stream.
///
/// A list of packet [`Item`]s, serialized under the key `Packet`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct Report {
    #[serde(rename = "Packet", skip_serializing_if = "Vec::is_empty")]
    packets: Vec<Item>,
}

impl Report {
    /// Returns a report for the given packets.
    pub fn new(packets: Vec<Item>) -> Self {
        Report { packets }
    }

    /// Returns the packets.
    pub fn packets(&self) -> &[Item] {
        &self.packets
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for packet in self.packets.iter() {
            packet.render(f, 0)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Item {
        let mut root = Item::new("Signature Packet (tag 2)")
            .with_note("5 bytes")
            .with_dump(Some(Dump::new(vec![4, 1, 0x13, 8, 0])));
        root.push(Item::new("Version").with_value("4").with_note("current"));
        let mut group = Item::new("Hashed Subpacket").with_note("0 bytes");
        group.push(Item::new("Flag")
                   .with_value("This key may be used to sign data."));
        root.push(group);
        root
    }

    #[test]
    fn text() {
        assert_eq!(sample().to_string(),
                   "Signature Packet (tag 2) (5 bytes)\n\
                    \t04 01 13 08 00\n\
                    \tVersion: 4 (current)\n\
                    \tHashed Subpacket (0 bytes)\n\
                    \t\tFlag: This key may be used to sign data.\n");
    }

    #[test]
    fn empty_dump_is_dropped() {
        let i = Item::new("x").with_dump(Some(Dump::new(vec![])));
        assert!(i.dump().is_none());
        assert_eq!(i.to_string(), "x\n");
    }

    #[test]
    fn grouped() {
        let d = Dump::grouped((0u8..20).collect::<Vec<_>>());
        assert_eq!(d.to_string(),
                   "00 01 02 03 04 05 06 07  08 09 0a 0b 0c 0d 0e 0f\n\
                    10 11 12 13");

        let mut i = Item::new("Literal data");
        i.set_dump(Some(d));
        assert_eq!(i.to_string(),
                   "Literal data\n\
                    \t00 01 02 03 04 05 06 07  08 09 0a 0b 0c 0d 0e 0f\n\
                    \t10 11 12 13\n");
    }

    #[test]
    fn serialize() {
        let report = Report::new(vec![sample()]);
        assert_eq!(serde_json::to_string(&report).unwrap(),
                   r#"{"Packet":[{"name":"Signature Packet (tag 2)","dump":"04 01 13 08 00","note":"5 bytes","Item":[{"name":"Version","value":"4","note":"current"},{"name":"Hashed Subpacket","note":"0 bytes","Item":[{"name":"Flag","value":"This key may be used to sign data."}]}]}]}"#);
        assert_eq!(serde_json::to_string(&Report::default()).unwrap(), "{}");
    }

    #[test]
    fn lookup() {
        let root = sample();
        assert_eq!(root.child("Version").and_then(|v| v.value()), Some("4"));
        assert!(root.child("Nope").is_none());
        assert_eq!(to_hex(&[0x31, 0xfb, 0x0a]), "31fb0a");
    }
}
