use crate::error::PathError;
use crate::tag::Tag;

/// Resolves slash separated path against a tag tree.
///
/// Each segment is a compound key or, for lists, an element index.
/// Empty segments are ignored, so `"/Level/"` is the same as `"Level"`.
pub fn resolve<'a>(tag: &'a Tag, path: &str) -> Result<&'a Tag, PathError> {
    let mut current = tag;

    for segment in path.split('/').filter(|segment| !segment.is_empty()) {
        current = step(current, path, segment)?;
    }

    Ok(current)
}

fn step<'a>(tag: &'a Tag, path: &str, segment: &str) -> Result<&'a Tag, PathError> {
    match tag {
        Tag::Compound(compound) => compound.get(segment).ok_or_else(|| PathError::MissingKey {
            path: path.to_owned(),
            segment: segment.to_owned(),
        }),
        Tag::List(list) => {
            let index = segment
                .parse::<usize>()
                .map_err(|_| PathError::InvalidIndex {
                    path: path.to_owned(),
                    segment: segment.to_owned(),
                })?;

            list.get(index).ok_or_else(|| PathError::IndexOutOfRange {
                path: path.to_owned(),
                segment: segment.to_owned(),
                length: list.len(),
            })
        }
        other => Err(PathError::NotAContainer {
            path: path.to_owned(),
            segment: segment.to_owned(),
            kind: other.kind(),
        }),
    }
}
