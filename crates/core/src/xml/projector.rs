//! Recursively builds a [`VirtualDocument`] mirroring one host subtree.

use crate::error::UastError;
use crate::host::UastNode;
use crate::roles::RoleResolver;

use super::VirtualDocument;

/// Walks a host subtree depth-first, building a [`VirtualDocument`] whose elements
/// carry back-references to the originating host nodes.
pub struct Projector;

impl Projector {
    /// Projects `root` and everything reachable from it into a fresh document.
    ///
    /// On any failure the partially built document is simply dropped (it owns no
    /// external resources, so there is nothing further to release) and the error
    /// is returned; no partial document escapes the call.
    pub fn project<H: UastNode>(
        root: H,
        resolver: &impl RoleResolver,
    ) -> Result<VirtualDocument<H>, UastError> {
        let mut doc = VirtualDocument::new();
        build(&mut doc, None, root, resolver)?;
        Ok(doc)
    }
}

fn build<H: UastNode>(
    doc: &mut VirtualDocument<H>,
    parent: Option<u32>,
    host: H,
    resolver: &impl RoleResolver,
) -> Result<u32, UastError> {
    let tag = host.internal_type();
    if tag.is_empty() {
        log::warn!("host node returned an empty internal type during projection");
        return Err(UastError::EmptyInternalType);
    }
    let idx = doc.push_element(parent, host, tag.to_string());

    if let Some(token) = host.token() {
        doc.push_attribute(idx, "token".to_string(), token.to_string());
    }

    for i in 0..host.roles_size() {
        let role_id = host.role_at(i);
        match resolver.role_name(role_id) {
            Some(name) => {
                doc.push_attribute(idx, name.to_string(), String::new());
            }
            None => log::debug!("role id {role_id} has no registered name, omitting"),
        }
    }

    for i in 0..host.properties_size() {
        let key = host.property_key_at(i).to_string();
        let value = host.property_value_at(i).to_string();
        doc.push_attribute(idx, key, value);
    }

    push_position_attributes(doc, idx, &host);

    for i in 0..host.children_size() {
        build(doc, Some(idx), host.child_at(i), resolver)?;
    }

    Ok(idx)
}

fn push_position_attributes<H: UastNode>(doc: &mut VirtualDocument<H>, idx: u32, host: &H) {
    if host.has_start_offset() {
        doc.push_attribute(idx, "startOffset".to_string(), host.start_offset().to_string());
    }
    if host.has_start_line() {
        doc.push_attribute(idx, "startLine".to_string(), host.start_line().to_string());
    }
    if host.has_start_col() {
        doc.push_attribute(idx, "startCol".to_string(), host.start_col().to_string());
    }
    if host.has_end_offset() {
        doc.push_attribute(idx, "endOffset".to_string(), host.end_offset().to_string());
    }
    if host.has_end_line() {
        doc.push_attribute(idx, "endLine".to_string(), host.end_line().to_string());
    }
    if host.has_end_col() {
        doc.push_attribute(idx, "endCol".to_string(), host.end_col().to_string());
    }
}
