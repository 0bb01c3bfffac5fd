//! The node-factory interface the HTML tree builder writes through.

use crate::{AttributesMap, DoctypeData, DomTree, ElementData, NodeId, NodeType, QuirksMode};

/// Node creation and mutation operations needed by tree construction.
///
/// The tree builder never touches a concrete DOM; every node it creates and
/// every link it makes goes through this trait, so callers can substitute their
/// own node storage. Nodes are addressed by [`NodeId`], which the sink hands
/// out from its `create_*` methods. [`TreeSink::document`] must return the id
/// of a pre-existing document node.
pub trait TreeSink {
    /// The document node that parsing starts from.
    fn document(&self) -> NodeId {
        NodeId::ROOT
    }

    /// Create a detached element.
    fn create_element(&mut self, name: &str, attrs: AttributesMap) -> NodeId;

    /// Create a detached text node.
    fn create_text(&mut self, text: &str) -> NodeId;

    /// Create a detached raw data node (`script`/`style` contents).
    fn create_data(&mut self, data: &str) -> NodeId;

    /// Create a detached comment.
    fn create_comment(&mut self, data: &str) -> NodeId;

    /// Create a detached document type node.
    fn create_doctype(&mut self, name: &str, public_id: &str, system_id: &str) -> NodeId;

    /// Create a detached processing instruction from a bogus comment.
    fn create_processing_instruction(&mut self, data: &str) -> NodeId;

    /// Append `child` as the last child of `parent`.
    fn append(&mut self, parent: NodeId, child: NodeId);

    /// Insert `child` into `parent` directly before `reference`.
    fn insert_before(&mut self, parent: NodeId, child: NodeId, reference: NodeId);

    /// Remove `node` from its parent, if it has one.
    fn detach(&mut self, node: NodeId);

    /// Move all children of `from` to the end of `to`.
    fn reparent_children(&mut self, from: NodeId, to: NodeId);

    /// The parent of `node`, if attached.
    fn parent(&self, node: NodeId) -> Option<NodeId>;

    /// The children of `node`, in order.
    fn child_nodes(&self, node: NodeId) -> Vec<NodeId>;

    /// The local name of `node` if it is an element.
    fn element_name(&self, node: NodeId) -> Option<&str>;

    /// Copy each attribute onto `node` unless it already has one of that name.
    fn add_attributes_if_missing(&mut self, node: NodeId, attrs: &AttributesMap);

    /// Insert text at a location, merging with a directly preceding text node.
    ///
    /// The location is "inside `parent`, before `before`" or at the end of
    /// `parent` when `before` is `None`. When `raw` is set the text is script or
    /// style content and merges only with a preceding data node.
    fn append_text(&mut self, parent: NodeId, before: Option<NodeId>, text: &str, raw: bool);

    /// Record the document's quirks mode.
    fn set_quirks_mode(&mut self, mode: QuirksMode);

    /// Record the document's base URI.
    fn set_base_uri(&mut self, uri: &str);
}

impl TreeSink for DomTree {
    fn create_element(&mut self, name: &str, attrs: AttributesMap) -> NodeId {
        self.alloc(NodeType::Element(ElementData::new(name, attrs)))
    }

    fn create_text(&mut self, text: &str) -> NodeId {
        self.alloc(NodeType::Text(text.to_string()))
    }

    fn create_data(&mut self, data: &str) -> NodeId {
        self.alloc(NodeType::Data(data.to_string()))
    }

    fn create_comment(&mut self, data: &str) -> NodeId {
        self.alloc(NodeType::Comment(data.to_string()))
    }

    fn create_doctype(&mut self, name: &str, public_id: &str, system_id: &str) -> NodeId {
        self.alloc(NodeType::Doctype(DoctypeData {
            name: name.to_string(),
            public_id: public_id.to_string(),
            system_id: system_id.to_string(),
        }))
    }

    fn create_processing_instruction(&mut self, data: &str) -> NodeId {
        self.alloc(NodeType::ProcessingInstruction(data.to_string()))
    }

    fn append(&mut self, parent: NodeId, child: NodeId) {
        self.append_child(parent, child);
    }

    fn insert_before(&mut self, parent: NodeId, child: NodeId, reference: NodeId) {
        Self::insert_before(self, parent, child, reference);
    }

    fn detach(&mut self, node: NodeId) {
        Self::detach(self, node);
    }

    fn reparent_children(&mut self, from: NodeId, to: NodeId) {
        self.move_children(from, to);
    }

    fn parent(&self, node: NodeId) -> Option<NodeId> {
        Self::parent(self, node)
    }

    fn child_nodes(&self, node: NodeId) -> Vec<NodeId> {
        self.children(node).to_vec()
    }

    fn element_name(&self, node: NodeId) -> Option<&str> {
        self.as_element(node).map(|data| data.tag_name.as_str())
    }

    fn add_attributes_if_missing(&mut self, node: NodeId, attrs: &AttributesMap) {
        if let Some(element) = self.as_element_mut(node) {
            for (name, value) in attrs.iter() {
                let _ = element.attrs.insert_if_absent(name, value);
            }
        }
    }

    fn append_text(&mut self, parent: NodeId, before: Option<NodeId>, text: &str, raw: bool) {
        // [§ 13.2.6.1 Insert a character](https://html.spec.whatwg.org/multipage/parsing.html#insert-a-character)
        // "If there is a Text node immediately before the adjusted insertion
        //  location, then append data to that Text node's data."
        let adjacent = match before {
            Some(reference) if Self::parent(self, reference) == Some(parent) => {
                self.prev_sibling(reference)
            }
            Some(_) => None,
            None => self.last_child(parent),
        };

        if let Some(id) = adjacent
            && let Some(node) = self.get_mut(id)
        {
            match &mut node.node_type {
                NodeType::Text(existing) if !raw => {
                    existing.push_str(text);
                    return;
                }
                NodeType::Data(existing) if raw => {
                    existing.push_str(text);
                    return;
                }
                _ => {}
            }
        }

        // "Otherwise, create a new Text node whose data is data... and insert
        //  the newly created node at the adjusted insertion location."
        let node = if raw {
            self.create_data(text)
        } else {
            self.create_text(text)
        };
        match before {
            Some(reference) => Self::insert_before(self, parent, node, reference),
            None => self.append_child(parent, node),
        }
    }

    fn set_quirks_mode(&mut self, mode: QuirksMode) {
        if let Some(data) = self.document_data_mut() {
            data.quirks_mode = mode;
        }
    }

    fn set_base_uri(&mut self, uri: &str) {
        if let Some(data) = self.document_data_mut() {
            data.base_uri = Some(uri.to_string());
        }
    }
}
