use super::{Path, Segment};
use serde_json::Value;

/// The result of an edit against a path that may not resolve.
#[must_use]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The document was changed.
    Applied,
    /// The path did not resolve; the document is untouched.
    Skipped,
}

impl Outcome {
    pub fn is_applied(self) -> bool {
        matches!(self, Outcome::Applied)
    }
}

fn step<'a>(value: &'a Value, segment: &Segment) -> Option<&'a Value> {
    match (segment, value) {
        (Segment::Name(name), Value::Object(map)) => map.get(name),
        (Segment::Index(index), Value::Array(items)) => items.get(*index),
        _ => None,
    }
}

fn step_mut<'a>(value: &'a mut Value, segment: &Segment) -> Option<&'a mut Value> {
    match (segment, value) {
        (Segment::Name(name), Value::Object(map)) => map.get_mut(name),
        (Segment::Index(index), Value::Array(items)) => items.get_mut(*index),
        _ => None,
    }
}

/// Walks `path` from the document root. Returns `None` as soon as an
/// intermediate value is not a container of the expected shape.
pub fn resolve<'a>(document: &'a Value, path: &Path) -> Option<&'a Value> {
    path.segments()
        .iter()
        .try_fold(document, |value, segment| step(value, segment))
}

/// Mutable counterpart of [`resolve`].
pub fn resolve_mut<'a>(document: &'a mut Value, path: &Path) -> Option<&'a mut Value> {
    path.segments()
        .iter()
        .try_fold(document, |value, segment| step_mut(value, segment))
}

/// Writes `value` at `path`, creating missing intermediate containers.
///
/// A missing (or `null`) intermediate becomes an object when the next segment
/// is a name and an array when it is an index. An index equal to the array
/// length appends. The edit is skipped rather than leaving a hole in an array
/// or overwriting an existing scalar on the way down.
pub fn set(document: &mut Value, path: &Path, value: Value) -> Outcome {
    let segments = path.segments();
    let mut current = document;
    for (position, segment) in segments.iter().enumerate() {
        let is_last = position + 1 == segments.len();
        let placeholder = match segments.get(position + 1) {
            Some(Segment::Index(_)) => Value::Array(Vec::new()),
            _ => Value::Object(serde_json::Map::new()),
        };

        if current.is_null() {
            *current = match segment {
                Segment::Name(_) => Value::Object(serde_json::Map::new()),
                Segment::Index(_) => Value::Array(Vec::new()),
            };
        }

        current = match (segment, current) {
            (Segment::Name(name), Value::Object(map)) => {
                if is_last {
                    map.insert(name.clone(), value);
                    return Outcome::Applied;
                }
                map.entry(name.clone()).or_insert(placeholder)
            }
            (Segment::Index(index), Value::Array(items)) => {
                if *index > items.len() {
                    return Outcome::Skipped;
                }
                if is_last {
                    if *index == items.len() {
                        items.push(value);
                    } else {
                        items[*index] = value;
                    }
                    return Outcome::Applied;
                }
                if *index == items.len() {
                    items.push(placeholder);
                }
                &mut items[*index]
            }
            _ => return Outcome::Skipped,
        };
    }
    Outcome::Skipped
}
