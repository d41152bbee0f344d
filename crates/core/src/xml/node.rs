//! `VirtualNode`, the `DataSourceNode` view onto a [`super::VirtualDocument`].

use std::hash::{Hash, Hasher};

use uast_xpath1::{DataSourceNode, NodeType, QName};

use super::document::VirtualDocument;

#[derive(Clone, Copy, PartialEq, Eq, Hash)]
enum NodeRef {
    /// The synthetic document root sitting above the projected top element. Has
    /// no host counterpart and no name; its only child is `Element(0)`.
    Root,
    Element(u32),
    Attribute(u32),
}

/// A handle onto one node (root, element, or attribute) of a [`VirtualDocument`].
///
/// Equality, hashing and ordering are defined purely by the underlying id: two
/// `VirtualNode`s built from the same document and the same root/element/attribute
/// identity are the same node regardless of which document reference produced them.
/// Ordering follows document order, which is what the `uast_xpath1` axes rely on
/// to sort `following`/`preceding`/union node-sets (mirroring
/// `uast_xpath1::datasource::tests::MockNode`'s id-based identity).
pub struct VirtualNode<'doc, H> {
    doc: &'doc VirtualDocument<H>,
    id: NodeRef,
}

impl<'doc, H> VirtualNode<'doc, H> {
    pub(crate) fn element(doc: &'doc VirtualDocument<H>, idx: u32) -> Self {
        Self {
            doc,
            id: NodeRef::Element(idx),
        }
    }

    pub(crate) fn attribute(doc: &'doc VirtualDocument<H>, idx: u32) -> Self {
        Self {
            doc,
            id: NodeRef::Attribute(idx),
        }
    }

    pub(crate) fn document_root(doc: &'doc VirtualDocument<H>) -> Self {
        Self {
            doc,
            id: NodeRef::Root,
        }
    }

    fn seq(&self) -> u32 {
        match self.id {
            NodeRef::Root => 0,
            NodeRef::Element(i) => self.doc.element(i).seq,
            NodeRef::Attribute(i) => self.doc.attribute(i).seq,
        }
    }

    /// The host node this virtual element projects, i.e. its back-reference.
    /// `None` for the synthetic document root and for attribute nodes, neither of
    /// which has a host counterpart -- `filter_nodes` excludes any node-set member
    /// for which this returns `None`.
    pub fn host_ref(&self) -> Option<H>
    where
        H: Copy,
    {
        match self.id {
            NodeRef::Root => None,
            NodeRef::Element(i) => Some(self.doc.element(i).host),
            NodeRef::Attribute(_) => None,
        }
    }
}

impl<'doc, H> Clone for VirtualNode<'doc, H> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<'doc, H> Copy for VirtualNode<'doc, H> {}

impl<'doc, H> std::fmt::Debug for VirtualNode<'doc, H> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.id {
            NodeRef::Root => write!(f, "VirtualNode::Root"),
            NodeRef::Element(i) => write!(f, "VirtualNode::Element({i})"),
            NodeRef::Attribute(i) => write!(f, "VirtualNode::Attribute({i})"),
        }
    }
}

impl<'doc, H> PartialEq for VirtualNode<'doc, H> {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl<'doc, H> Eq for VirtualNode<'doc, H> {}

impl<'doc, H> Hash for VirtualNode<'doc, H> {
    fn hash<S: Hasher>(&self, state: &mut S) {
        self.id.hash(state);
    }
}

impl<'doc, H> PartialOrd for VirtualNode<'doc, H> {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl<'doc, H> Ord for VirtualNode<'doc, H> {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.seq().cmp(&other.seq())
    }
}

impl<'doc, H: Copy> DataSourceNode<'doc> for VirtualNode<'doc, H> {
    fn node_type(&self) -> NodeType {
        match self.id {
            NodeRef::Root => NodeType::Root,
            NodeRef::Element(_) => NodeType::Element,
            NodeRef::Attribute(_) => NodeType::Attribute,
        }
    }

    fn name(&self) -> Option<QName<'doc>> {
        match self.id {
            NodeRef::Root => None,
            NodeRef::Element(i) => Some(QName {
                prefix: None,
                local_part: &self.doc.element(i).tag,
            }),
            NodeRef::Attribute(i) => Some(QName {
                prefix: None,
                local_part: &self.doc.attribute(i).name,
            }),
        }
    }

    /// Elements carry no text content in this projection -- everything a host
    /// node carries is expressed as attributes -- so an element's string value is
    /// always empty; an attribute's is its value. The document root, having no
    /// text descendants either, is likewise always empty.
    fn string_value(&self) -> String {
        match self.id {
            NodeRef::Root => String::new(),
            NodeRef::Element(_) => String::new(),
            NodeRef::Attribute(i) => self.doc.attribute(i).value.clone(),
        }
    }

    fn attributes(&self) -> Box<dyn Iterator<Item = Self> + 'doc> {
        match self.id {
            NodeRef::Root => Box::new(std::iter::empty()),
            NodeRef::Element(i) => {
                let doc = self.doc;
                Box::new(
                    doc.element(i)
                        .attributes
                        .iter()
                        .map(move |&a| VirtualNode::attribute(doc, a)),
                )
            }
            NodeRef::Attribute(_) => Box::new(std::iter::empty()),
        }
    }

    fn children(&self) -> Box<dyn Iterator<Item = Self> + 'doc> {
        match self.id {
            NodeRef::Root => Box::new(std::iter::once(VirtualNode::element(self.doc, 0))),
            NodeRef::Element(i) => {
                let doc = self.doc;
                Box::new(
                    doc.element(i)
                        .children
                        .iter()
                        .map(move |&c| VirtualNode::element(doc, c)),
                )
            }
            NodeRef::Attribute(_) => Box::new(std::iter::empty()),
        }
    }

    fn parent(&self) -> Option<Self> {
        match self.id {
            NodeRef::Root => None,
            // An element with no recorded parent is the projected top element,
            // whose parent is the synthetic document root, not the host-absent
            // `None` it was pushed with.
            NodeRef::Element(i) => Some(match self.doc.element(i).parent {
                Some(p) => VirtualNode::element(self.doc, p),
                None => VirtualNode::document_root(self.doc),
            }),
            NodeRef::Attribute(i) => Some(VirtualNode::element(self.doc, self.doc.attribute(i).owner)),
        }
    }
}
