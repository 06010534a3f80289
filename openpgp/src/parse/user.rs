//! User ID and user attribute packets.

use crate::{Context, Cursor, Item, Result};
use super::subpacket::{self, Namespace};
use super::values;

/// Decodes a user ID packet body, see [Section 5.11 of RFC 4880].
///
/// The user ID is shown as text; invalid UTF-8 is replaced.
///
///   [Section 5.11 of RFC 4880]: https://tools.ietf.org/html/rfc4880#section-5.11
pub(crate) fn user_id(item: &mut Item, cursor: &mut Cursor, ctx: &mut Context)
                      -> Result<()>
{
    let data = cursor.read_to_end();
    item.push(Item::new("User ID")
              .with_value(values::text(&data))
              .with_dump(ctx.debug_dump(&data)));
    Ok(())
}

/// Decodes a user attribute packet body, see [Section 5.12 of RFC
/// 4880].
///
///   [Section 5.12 of RFC 4880]: https://tools.ietf.org/html/rfc4880#section-5.12
pub(crate) fn user_attribute(item: &mut Item, cursor: &mut Cursor,
                             ctx: &mut Context)
                             -> Result<()>
{
    let data = cursor.read_to_end();
    let (items, r) =
        subpacket::parse_region(&data, Namespace::UserAttribute, ctx);
    item.children_mut().extend(items);
    r
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Tag;
    use crate::parse::dispatch;

    #[test]
    fn user_id() {
        let mut ctx = Context::new(Default::default());
        let (item, r) = dispatch(Tag::UserID, b"Alice <a@ex.org>", &mut ctx);
        r.unwrap();
        assert_eq!(item.to_string(), "\
User ID Packet (tag 13) (16 bytes)
\tUser ID: Alice <a@ex.org>
");

        let (item, r) = dispatch(Tag::UserID, b"\xffA", &mut ctx);
        r.unwrap();
        assert_eq!(item.children()[0].value(), Some("\u{fffd}A"));
    }

    #[test]
    fn user_attribute() {
        let mut ctx = Context::new(Default::default());
        // An image with an unknown encoding, then a private subpacket.
        let mut body = vec![17, 1, 0x10, 0x00, 0x01, 0x09];
        body.extend_from_slice(&[0; 12]);
        body.extend_from_slice(&[2, 101, 0xaa]);
        let (item, r) = dispatch(Tag::UserAttribute, &body, &mut ctx);
        r.unwrap();
        let names: Vec<&str> =
            item.children().iter().map(|c| c.name()).collect();
        assert_eq!(names, vec![
            "Image Attribute (sub 1)",
            "Private or experimental (sub 101)",
        ]);
    }

    #[test]
    fn broken_attribute_region() {
        let mut ctx = Context::new(Default::default());
        let (item, r) = dispatch(Tag::UserAttribute, &[9, 1, 0], &mut ctx);
        assert!(crate::Error::is_truncated(&r.unwrap_err()));
        assert!(item.children().is_empty());
    }
}
