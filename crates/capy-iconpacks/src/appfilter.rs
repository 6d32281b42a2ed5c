//! Descriptor (appfilter.xml) parsing.
//!
//! The descriptor is walked as an event stream; only the `component` and
//! `drawable` attributes of `<item>` elements matter, so no tree is built.

use crate::error::IconPackError;
use crate::registry::ResourceContainer;
use log::{debug, warn};
use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};
use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::io::{BufRead, BufReader};

const ITEM_TAG: &[u8] = b"item";
const COMPONENT_ATTR: &[u8] = b"component";
const DRAWABLE_ATTR: &[u8] = b"drawable";

/// Component string -> drawable name index of one pack.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Mapping {
    /// First occurrence of each component wins; the drawable may be absent.
    entries: HashMap<String, Option<String>>,
}

impl Mapping {
    /// Drawable name mapped to `component`, if it is present and non-empty.
    pub fn drawable_for(&self, component: &str) -> Option<&str> {
        self.entries
            .get(component)
            .and_then(|d| d.as_deref())
            .filter(|d| !d.is_empty())
    }

    pub fn contains(&self, component: &str) -> bool {
        self.entries.contains_key(component)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Record an entry unless the component is already known.
    fn insert_first(&mut self, component: String, drawable: Option<String>) {
        if let Entry::Vacant(slot) = self.entries.entry(component) {
            slot.insert(drawable);
        }
    }
}

/// Open the descriptor asset of a pack and parse it.
///
/// Fails only if the asset cannot be opened. Corruption inside the document
/// keeps whatever entries were read before it.
pub fn load_mapping(
    resources: &dyn ResourceContainer,
    package_id: &str,
    descriptor: &str,
) -> Result<Mapping, IconPackError> {
    let input = resources
        .open_asset(descriptor)
        .map_err(|e| IconPackError::Parse {
            package: package_id.to_string(),
            message: e.to_string(),
        })?;

    let mapping = parse_mapping(BufReader::new(input));
    debug!(
        "Parsed {} entries from {} of {}",
        mapping.len(),
        descriptor,
        package_id
    );
    Ok(mapping)
}

/// Parse a descriptor stream into a mapping.
pub fn parse_mapping<R: BufRead>(input: R) -> Mapping {
    let mut mapping = Mapping::default();
    let mut reader = Reader::from_reader(input);
    let mut buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(ref e)) | Ok(Event::Empty(ref e)) if e.name().as_ref() == ITEM_TAG => {
                if let Some((component, drawable)) = read_item(e) {
                    mapping.insert_first(component, drawable);
                }
            }
            Ok(Event::Eof) => break,
            Ok(_) => {}
            Err(e) => {
                warn!(
                    "Descriptor corrupt at byte {}: {}. Keeping {} entries",
                    reader.buffer_position(),
                    e,
                    mapping.len()
                );
                break;
            }
        }
        buf.clear();
    }

    mapping
}

/// Extract (component, drawable) from an item; `None` if it has no usable component.
fn read_item(item: &BytesStart<'_>) -> Option<(String, Option<String>)> {
    let mut component = None;
    let mut drawable = None;

    for attr in item.attributes() {
        let attr = match attr {
            Ok(attr) => attr,
            Err(e) => {
                debug!("Skipping item with malformed attributes: {}", e);
                return None;
            }
        };

        let value = match attr.unescape_value() {
            Ok(value) => value.into_owned(),
            Err(e) => {
                debug!("Skipping item with undecodable attribute: {}", e);
                return None;
            }
        };

        match attr.key.as_ref() {
            COMPONENT_ATTR if component.is_none() => component = Some(value),
            DRAWABLE_ATTR if drawable.is_none() => drawable = Some(value),
            _ => {}
        }
    }

    let component = component.filter(|c| !c.is_empty())?;
    Some((component, drawable))
}
