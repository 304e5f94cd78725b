use std::cell::RefCell;

use super::{EventHandler, SurfaceError, UiSurface};

pub type NodeId = usize;

struct Node {
    tag: String,
    class_name: String,
    attributes: Vec<(String, String)>,
    text: String,
    value: Option<String>,
    children: Vec<NodeId>,
    listeners: Vec<(String, EventHandler)>,
}

impl Node {
    fn new(tag: &str) -> Node {
        let value = match tag {
            "input" | "textarea" => Some(String::new()),
            _ => None,
        };
        Node {
            tag: tag.to_string(),
            class_name: String::new(),
            attributes: Vec::new(),
            text: String::new(),
            value,
            children: Vec::new(),
            listeners: Vec::new(),
        }
    }

    fn has_class(&self, class_name: &str) -> bool {
        self.class_name.split_whitespace().any(|c| c == class_name)
    }
}

/// Element tree kept in memory, standing in for the browser document.
pub struct MemorySurface {
    nodes: RefCell<Vec<Node>>,
    body: NodeId,
}

impl MemorySurface {
    pub fn new() -> MemorySurface {
        MemorySurface {
            nodes: RefCell::new(vec![Node::new("body")]),
            body: 0,
        }
    }

    pub fn body(&self) -> NodeId {
        self.body
    }

    /// Appends a new element to `parent` and returns it.
    pub fn add(&self, parent: NodeId, tag: &str, class_name: &str, text: &str) -> NodeId {
        let id = self.create_element(tag).unwrap();
        self.set_class_name(&id, class_name);
        self.set_text(&id, text);
        self.append_child(&parent, &id).unwrap();
        id
    }

    /// Adds a `.fp-field-edit` container with its `dt`/`dd` pair and, when
    /// `stored` is given, a textarea holding it.
    pub fn add_form_field(&self, label: &str, stored: Option<&str>) -> (NodeId, Option<NodeId>) {
        let container = self.add(self.body, "dl", "fp-field-edit", "");
        self.add(container, "dt", "", label);
        let dd = self.add(container, "dd", "", "");
        let textarea = stored.map(|stored| {
            let textarea = self.add(dd, "textarea", "", "");
            self.set_value(&textarea, stored).unwrap();
            textarea
        });
        (container, textarea)
    }

    pub fn tag(&self, id: NodeId) -> String {
        self.nodes.borrow()[id].tag.clone()
    }

    pub fn class_name(&self, id: NodeId) -> String {
        self.nodes.borrow()[id].class_name.clone()
    }

    pub fn children(&self, id: NodeId) -> Vec<NodeId> {
        self.nodes.borrow()[id].children.clone()
    }

    pub fn listener_count(&self, id: NodeId, event: &str) -> usize {
        self.nodes.borrow()[id]
            .listeners
            .iter()
            .filter(|(name, _)| name == event)
            .count()
    }

    pub fn fire(&self, id: NodeId, event: &str) {
        let handlers: Vec<EventHandler> = self.nodes.borrow()[id]
            .listeners
            .iter()
            .filter(|(name, _)| name == event)
            .map(|(_, handler)| handler.clone())
            .collect();
        for handler in handlers {
            handler();
        }
    }

    /// Replaces the value of a control and fires `input` on it, like typing.
    pub fn type_into(&self, id: NodeId, value: &str) {
        self.set_value(&id, value).unwrap();
        self.fire(id, "input");
    }

    pub fn click(&self, id: NodeId) {
        self.fire(id, "click");
    }

    fn descendants(&self, root: NodeId, out: &mut Vec<NodeId>) {
        let children = self.children(root);
        for child in children {
            out.push(child);
            self.descendants(child, out);
        }
    }

    fn find_descendants<F>(&self, root: NodeId, pred: F) -> Vec<NodeId>
    where
        F: Fn(&Node) -> bool,
    {
        let mut all = Vec::new();
        self.descendants(root, &mut all);
        let nodes = self.nodes.borrow();
        all.into_iter().filter(|id| pred(&nodes[*id])).collect()
    }
}

impl UiSurface for MemorySurface {
    type Element = NodeId;

    fn document_elements_by_class(&self, class_name: &str) -> Vec<NodeId> {
        self.find_descendants(self.body, |node| node.has_class(class_name))
    }

    fn elements_by_class(&self, root: &NodeId, class_name: &str) -> Vec<NodeId> {
        self.find_descendants(*root, |node| node.has_class(class_name))
    }

    fn first_element_by_tag(&self, root: &NodeId, tag: &str) -> Option<NodeId> {
        self.find_descendants(*root, |node| node.tag == tag)
            .into_iter()
            .next()
    }

    fn text_content(&self, element: &NodeId) -> Option<String> {
        let mut text = self.nodes.borrow()[*element].text.clone();
        let mut all = Vec::new();
        self.descendants(*element, &mut all);
        let nodes = self.nodes.borrow();
        for id in all {
            text.push_str(&nodes[id].text);
        }
        Some(text)
    }

    fn create_element(&self, tag: &str) -> Result<NodeId, SurfaceError> {
        if tag.is_empty() {
            return Err(SurfaceError::new("empty tag name".to_string()));
        }
        let mut nodes = self.nodes.borrow_mut();
        nodes.push(Node::new(tag));
        Ok(nodes.len() - 1)
    }

    fn set_attribute(&self, element: &NodeId, name: &str, value: &str) -> Result<(), SurfaceError> {
        let mut nodes = self.nodes.borrow_mut();
        let attributes = &mut nodes[*element].attributes;
        match attributes.iter_mut().find(|(n, _)| n == name) {
            Some(entry) => entry.1 = value.to_string(),
            None => attributes.push((name.to_string(), value.to_string())),
        }
        Ok(())
    }

    fn attribute(&self, element: &NodeId, name: &str) -> Option<String> {
        self.nodes.borrow()[*element]
            .attributes
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, value)| value.clone())
    }

    fn set_class_name(&self, element: &NodeId, class_name: &str) {
        self.nodes.borrow_mut()[*element].class_name = class_name.to_string();
    }

    fn set_text(&self, element: &NodeId, text: &str) {
        self.nodes.borrow_mut()[*element].text = text.to_string();
    }

    fn append_child(&self, parent: &NodeId, child: &NodeId) -> Result<(), SurfaceError> {
        if parent == child {
            return Err(SurfaceError::new("cannot append a node to itself".to_string()));
        }
        let mut nodes = self.nodes.borrow_mut();
        for node in nodes.iter_mut() {
            node.children.retain(|id| id != child);
        }
        nodes[*parent].children.push(*child);
        Ok(())
    }

    fn value(&self, element: &NodeId) -> Option<String> {
        self.nodes.borrow()[*element].value.clone()
    }

    fn set_value(&self, element: &NodeId, value: &str) -> Result<(), SurfaceError> {
        let mut nodes = self.nodes.borrow_mut();
        let node = &mut nodes[*element];
        match node.value.as_mut() {
            Some(current) => {
                *current = value.to_string();
                Ok(())
            }
            None => Err(SurfaceError::new(format!("<{}> has no value", node.tag))),
        }
    }

    fn add_listener(
        &self,
        element: &NodeId,
        event: &str,
        handler: EventHandler,
    ) -> Result<(), SurfaceError> {
        self.nodes.borrow_mut()[*element]
            .listeners
            .push((event.to_string(), handler));
        Ok(())
    }
}
