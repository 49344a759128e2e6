//! Label strategies for resolved entities

use crate::parser::{thing_label, Thing};

/// Chooses the human-readable label reported for a Thing
///
/// Closures of the form `Fn(&Thing) -> Option<String>` implement this
/// trait, so a deployment can override labelling without a new type.
pub trait LabelResolver: Send + Sync {
    fn label(&self, thing: &Thing) -> Option<String>;
}

/// Default strategy: the Thing's first `rdfs:label`
#[derive(Debug, Clone, Copy, Default)]
pub struct ThingLabel;

impl LabelResolver for ThingLabel {
    fn label(&self, thing: &Thing) -> Option<String> {
        thing_label(thing)
    }
}

impl<F> LabelResolver for F
where
    F: Fn(&Thing) -> Option<String> + Send + Sync,
{
    fn label(&self, thing: &Thing) -> Option<String> {
        self(thing)
    }
}
