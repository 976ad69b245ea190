//! Feed renderer
//!
//! Renders resolved items and channel metadata to RSS 2.0.

use crate::domain::entities::{Feed, Item, ItemFragment, ResolvedItem};
use crate::error::ResolveError;
use crate::feed::xml::XmlBuilder;

/// Content type served for rendered feeds
pub const RSS_CONTENT_TYPE: &str = "application/rss+xml; charset=utf-8";

/// Render one `<item>` element with its resolved destination link.
///
/// A failed resolution is returned unchanged and no fragment is produced.
pub fn render_item(resolved: ResolvedItem) -> Result<ItemFragment, ResolveError> {
    let ResolvedItem { item, link } = resolved;
    let mut b = XmlBuilder::with_capacity(256);
    b.try_scoped_tag("item", |b| -> Result<(), ResolveError> {
        let link = link?;
        write_item_fields(b, &item, &link);
        Ok(())
    })?;
    Ok(ItemFragment::new(b.finish()))
}

fn write_item_fields(b: &mut XmlBuilder, item: &Item, link: &str) {
    b.write_tag_if_non_empty("title", &item.title)
        .write_tag_if_non_empty("description", &item.description)
        .write_tag_if_non_empty("link", link)
        .write_tag_if_non_empty("guid", &item.guid)
        .write_tag_if_non_empty("pubDate", &item.published);
}

/// Render a complete RSS 2.0 document for `site`.
///
/// Items appear in the order of `fragments`; the caller is responsible for
/// keeping that aligned with the upstream item order.
pub fn render_feed(site: &str, feed: &Feed, fragments: &[ItemFragment]) -> String {
    let items_len: usize = fragments.iter().map(|f| f.as_str().len()).sum();
    let mut b = XmlBuilder::with_capacity(items_len + 1024);

    b.declaration();
    b.scoped_tag_with_attributes("rss", &[("version", "2.0")], |b| {
        b.scoped_tag("channel", |b| {
            b.write_tag_if_non_empty("title", &feed.title)
                .write_tag_if_non_empty("description", &feed.description)
                .write_tag_if_non_empty("link", &site_link(site))
                .write_tag_if_non_empty("feedLink", &feed.feed_link)
                .write_tag_if_non_empty("updated", &feed.updated)
                .write_tag_if_non_empty("lastBuildDate", &feed.updated)
                .write_tag_if_non_empty("pubDate", &feed.published)
                .write_tag_if_non_empty("generator", &feed.generator)
                .write_tag_if_non_empty("published", &feed.published)
                .write_tag_if_non_empty("language", &feed.language);

            for fragment in fragments {
                b.write_raw(fragment.as_str());
            }
        });
    });

    b.finish()
}

fn site_link(site: &str) -> String {
    format!("https://{}", site)
}
