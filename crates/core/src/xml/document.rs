//! The arena a [`super::projector::Projector`] fills in and a [`super::VirtualNode`]
//! is a handle into.

pub(crate) struct ElementData<H> {
    pub(crate) seq: u32,
    pub(crate) tag: String,
    pub(crate) host: H,
    pub(crate) parent: Option<u32>,
    pub(crate) attributes: Vec<u32>,
    pub(crate) children: Vec<u32>,
}

pub(crate) struct AttributeData {
    pub(crate) seq: u32,
    pub(crate) name: String,
    pub(crate) value: String,
    pub(crate) owner: u32,
}

/// The transient virtual XML document built for a single query evaluation. Every
/// element carries the host node it projects; it is created at the start of one
/// [`crate::query`] call and dropped before that call returns.
pub struct VirtualDocument<H> {
    elements: Vec<ElementData<H>>,
    attributes: Vec<AttributeData>,
    next_seq: u32,
}

impl<H> VirtualDocument<H> {
    pub(crate) fn new() -> Self {
        Self {
            elements: Vec::new(),
            attributes: Vec::new(),
            // 0 is reserved for the synthetic document root (see `document_root`);
            // the first element/attribute created gets seq 1, so the document root
            // always sorts first in document order.
            next_seq: 1,
        }
    }

    fn take_seq(&mut self) -> u32 {
        let seq = self.next_seq;
        self.next_seq += 1;
        seq
    }

    /// Creates a new element, tagged and back-referenced, optionally as a child of
    /// `parent`. Document order (and therefore `Ord`) is the order in which
    /// elements and attributes are created, which the [`super::projector::Projector`]
    /// drives as a pre-order walk with each node's attributes created immediately
    /// after the node itself.
    pub(crate) fn push_element(&mut self, parent: Option<u32>, host: H, tag: String) -> u32 {
        let seq = self.take_seq();
        let idx = self.elements.len() as u32;
        self.elements.push(ElementData {
            seq,
            tag,
            host,
            parent,
            attributes: Vec::new(),
            children: Vec::new(),
        });
        if let Some(parent) = parent {
            self.elements[parent as usize].children.push(idx);
        }
        idx
    }

    pub(crate) fn push_attribute(&mut self, owner: u32, name: String, value: String) -> u32 {
        let seq = self.take_seq();
        let idx = self.attributes.len() as u32;
        self.attributes.push(AttributeData {
            seq,
            name,
            value,
            owner,
        });
        self.elements[owner as usize].attributes.push(idx);
        idx
    }

    pub(crate) fn element(&self, idx: u32) -> &ElementData<H> {
        &self.elements[idx as usize]
    }

    pub(crate) fn attribute(&self, idx: u32) -> &AttributeData {
        &self.attributes[idx as usize]
    }

    /// The projected top element -- always index 0, since the Projector creates it
    /// first. This is the host's own root node as projected, used as the XPath
    /// engine's context node.
    pub fn root(&self) -> super::VirtualNode<'_, H> {
        super::VirtualNode::element(self, 0)
    }

    /// The synthetic document root sitting above the projected top element, whose
    /// only child is [`VirtualDocument::root`]. Passed to the XPath engine as its
    /// absolute-path anchor so that `//*` (`/descendant-or-self::node()/child::*`)
    /// also matches the top element itself, mirroring
    /// `uast_xpath1::datasource::tests::MockTree`'s own node 0, which is
    /// `NodeType::Root` with the document element as its child -- the top element
    /// has no parent of its own, so without this wrapper it could never be
    /// re-selected by a `child::` step.
    pub fn document_root(&self) -> super::VirtualNode<'_, H> {
        super::VirtualNode::document_root(self)
    }
}
