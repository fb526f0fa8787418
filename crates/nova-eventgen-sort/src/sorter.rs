use nova_eventgen_model::well_known::annotations::ABSOLUTE_SORT_POSITION;
use nova_eventgen_model::well_known::{decapitalize, strip_bean_prefix};
use nova_eventgen_model::AnnotationValue;
use nova_eventgen_resolve::Property;

use crate::SortPolicy;

/// Explicit `AbsoluteSortPosition` of a property, if any.
pub fn sort_position(property: &Property) -> Option<i64> {
    property
        .annotation_value(ABSOLUTE_SORT_POSITION, "value")
        .and_then(AnnotationValue::as_int)
}

/// Order `properties` under `policy`.
///
/// Only most-specific declarations take part. The result is: paired-prefix pairs (prefixed
/// member first), directional pairs (from-side first), remaining reference properties, then
/// primitives. Each bucket is sorted by name; pairs sort by their unprefixed / "to" member.
/// Pinned properties are finally inserted at `min(pin, len)`, in name order.
///
/// Sorting an already sorted list returns it unchanged.
pub fn sort_properties(properties: &[Property], policy: &SortPolicy) -> Vec<Property> {
    let mut remaining: Vec<&Property> = properties
        .iter()
        .filter(|p| p.is_most_specific())
        .collect();
    remaining.sort_by(|a, b| a.name().cmp(b.name()));

    let mut pinned = Vec::new();
    remaining.retain(|p| match sort_position(p) {
        Some(position) => {
            pinned.push((*p, position));
            false
        }
        None => true,
    });

    let mut paired = take_pairs(&mut remaining, |name| {
        strip_bean_prefix(name, &policy.paired_prefix).map(decapitalize)
    });
    paired.sort_by(|(_, a), (_, b)| a.name().cmp(b.name()));

    let mut primitives = Vec::new();
    remaining.retain(|p| {
        if p.is_primitive() {
            primitives.push(*p);
            false
        } else {
            true
        }
    });

    let mut directional = take_pairs(&mut remaining, |name| {
        policy.directional.iter().find_map(|(from, to)| {
            strip_bean_prefix(name, from).map(|rest| format!("{to}{rest}"))
        })
    });
    directional.sort_by(|(_, a), (_, b)| a.name().cmp(b.name()));

    let mut out: Vec<Property> = Vec::with_capacity(properties.len());
    for (first, second) in paired.into_iter().chain(directional) {
        out.push(first.clone());
        out.push(second.clone());
    }
    out.extend(remaining.into_iter().cloned());
    out.extend(primitives.into_iter().cloned());

    for (property, position) in pinned {
        let index = usize::try_from(position.max(0))
            .unwrap_or(usize::MAX)
            .min(out.len());
        out.insert(index, property.clone());
    }

    tracing::trace!(
        target: "nova.eventgen.sort",
        order = ?out.iter().map(Property::name).collect::<Vec<_>>(),
        "sorted properties"
    );
    out
}

/// Remove `(lead, partner)` pairs from `remaining`, where `partner_of(lead.name())` names a
/// property still present. Both members are taken out of `remaining`.
fn take_pairs<'a>(
    remaining: &mut Vec<&'a Property>,
    partner_of: impl Fn(&str) -> Option<String>,
) -> Vec<(&'a Property, &'a Property)> {
    let mut pairs = Vec::new();
    let mut idx = 0;
    while idx < remaining.len() {
        let partner = partner_of(remaining[idx].name()).and_then(|partner_name| {
            remaining
                .iter()
                .position(|p| p.name() == partner_name)
                .filter(|&pos| pos != idx)
        });
        match partner {
            Some(pos) => {
                let lead = remaining[idx];
                let partner = remaining[pos];
                // Remove the higher index first so the lower one stays valid.
                remaining.remove(idx.max(pos));
                remaining.remove(idx.min(pos));
                pairs.push((lead, partner));
                if pos < idx {
                    idx -= 1;
                }
            }
            None => idx += 1,
        }
    }
    pairs
}
