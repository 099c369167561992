mod content;
mod node;

pub use content::Content;
pub use node::{Display, Element};

/// Find an element by ID in the tree.
pub fn find_element<'a>(root: &'a Element, id: &str) -> Option<&'a Element> {
    if root.id == id {
        return Some(root);
    }

    if let Content::Children(children) = &root.content {
        for child in children {
            if let Some(found) = find_element(child, id) {
                return Some(found);
            }
        }
    }

    None
}

/// Find an element by ID in the tree, mutably.
pub fn find_element_mut<'a>(root: &'a mut Element, id: &str) -> Option<&'a mut Element> {
    if root.id == id {
        return Some(root);
    }

    if let Content::Children(children) = &mut root.content {
        for child in children {
            if let Some(found) = find_element_mut(child, id) {
                return Some(found);
            }
        }
    }

    None
}

/// Count the elements carrying this ID.
pub fn count_by_id(root: &Element, id: &str) -> usize {
    let own = usize::from(root.id == id);
    match &root.content {
        Content::Children(children) => {
            own + children.iter().map(|c| count_by_id(c, id)).sum::<usize>()
        }
        _ => own,
    }
}
