//! The list of active formatting elements and the adoption agency algorithm.
//!
//! [§ 13.2.4.3 The list of active formatting elements](https://html.spec.whatwg.org/multipage/parsing.html#the-list-of-active-formatting-elements)

use lark_dom::{NodeId, TreeSink};

use super::core::{HTMLTreeBuilder, tag_parts};
use crate::tokenizer::{Attribute, Token};

/// [§ 13.2.4.3 The list of active formatting elements](https://html.spec.whatwg.org/multipage/parsing.html#the-list-of-active-formatting-elements)
///
/// "The list of active formatting elements... is used to handle mis-nested
/// formatting element tags."
///
/// The list contains entries that are either elements or markers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActiveFormattingElement {
    /// A formatting element entry.
    Element {
        /// The element in the tree.
        node_id: NodeId,
        /// The token the element was created for, kept to recreate the
        /// element during reconstruction and the adoption agency algorithm.
        token: Token,
    },
    /// "A marker is an entry in the list of active formatting elements that is
    /// distinct from any element."
    ///
    /// Markers are inserted when entering applet, object, marquee, td, th and
    /// caption, so formatting elements from outside do not leak inside.
    Marker,
}

impl ActiveFormattingElement {
    /// The element of an element entry.
    #[must_use]
    pub const fn node_id(&self) -> Option<NodeId> {
        match self {
            Self::Element { node_id, .. } => Some(*node_id),
            Self::Marker => None,
        }
    }
}

/// Same tag name and attributes, in any order: the Noah's Ark comparison.
fn same_element(a: &Token, b: &Token) -> bool {
    let (a_name, a_attrs) = tag_parts(a);
    let (b_name, b_attrs) = tag_parts(b);
    a_name == b_name && a_attrs.len() == b_attrs.len() && a_attrs.iter().all(|attr| has_attribute(b_attrs, attr))
}

fn has_attribute(attributes: &[Attribute], wanted: &Attribute) -> bool {
    attributes
        .iter()
        .any(|attr| attr.name == wanted.name && attr.value == wanted.value)
}

impl<S: TreeSink> HTMLTreeBuilder<S> {
    /// [§ 13.2.4.3](https://html.spec.whatwg.org/multipage/parsing.html#push-onto-the-list-of-active-formatting-elements)
    ///
    /// "If there are already three elements in the list of active formatting
    /// elements after the last marker, if any, or anywhere in the list if there
    /// are no markers, that have the same tag name, namespace, and attributes
    /// as element, then remove the earliest such element from the list of
    /// active formatting elements."
    pub(crate) fn push_active_formatting_element(&mut self, node_id: NodeId, token: &Token) {
        let mut matching = 0;
        let mut earliest = None;
        for (index, entry) in self.active_formatting_elements.iter().enumerate().rev() {
            match entry {
                ActiveFormattingElement::Marker => break,
                ActiveFormattingElement::Element { token: existing, .. } => {
                    if same_element(existing, token) {
                        matching += 1;
                        earliest = Some(index);
                    }
                }
            }
        }
        if matching >= 3
            && let Some(index) = earliest
        {
            let _ = self.active_formatting_elements.remove(index);
        }

        // "Add element to the list of active formatting elements."
        self.active_formatting_elements
            .push(ActiveFormattingElement::Element {
                node_id,
                token: token.clone(),
            });
    }

    /// Push a marker, as on entering `applet`, `object`, `marquee`, `td`,
    /// `th` and `caption`.
    pub(crate) fn insert_marker(&mut self) {
        self.active_formatting_elements
            .push(ActiveFormattingElement::Marker);
    }

    /// [§ 13.2.4.3](https://html.spec.whatwg.org/multipage/parsing.html#clear-the-list-of-active-formatting-elements-up-to-the-last-marker)
    ///
    /// "1. Let entry be the last (most recently added) entry in the list.
    ///  2. Remove entry from the list.
    ///  3. If entry was a marker, then stop the algorithm at this point.
    ///  4. Go to step 1."
    pub(crate) fn clear_active_formatting_elements_to_last_marker(&mut self) {
        while let Some(entry) = self.active_formatting_elements.pop() {
            if entry == ActiveFormattingElement::Marker {
                break;
            }
        }
    }

    /// Index of `node` in the list of active formatting elements.
    pub(crate) fn formatting_position(&self, node: NodeId) -> Option<usize> {
        self.active_formatting_elements
            .iter()
            .rposition(|entry| entry.node_id() == Some(node))
    }

    pub(crate) fn remove_from_active_formatting_elements(&mut self, node: NodeId) {
        if let Some(index) = self.formatting_position(node) {
            let _ = self.active_formatting_elements.remove(index);
        }
    }

    /// The last element named `name` between the end of the list and the
    /// last marker, with its index.
    pub(crate) fn last_formatting_element_named(&self, name: &str) -> Option<(usize, NodeId)> {
        for (index, entry) in self.active_formatting_elements.iter().enumerate().rev() {
            match entry {
                ActiveFormattingElement::Marker => return None,
                ActiveFormattingElement::Element { node_id, .. } => {
                    if self.node_name(*node_id) == name {
                        return Some((index, *node_id));
                    }
                }
            }
        }
        None
    }

    /// [§ 13.2.4.3 Reconstruct the active formatting elements](https://html.spec.whatwg.org/multipage/parsing.html#reconstruct-the-active-formatting-elements)
    pub(crate) fn reconstruct_active_formatting_elements(&mut self) {
        // STEP 1: "If there are no entries in the list of active formatting
        //          elements, then there is nothing to reconstruct; stop this
        //          algorithm."
        // STEP 2: "If the last (most recently added) entry in the list of active
        //          formatting elements is a marker, or if it is an element that
        //          is in the stack of open elements, then there is nothing to
        //          reconstruct; stop this algorithm."
        let Some(last) = self.active_formatting_elements.last() else {
            return;
        };
        match last.node_id() {
            None => return,
            Some(node) if self.open_elements.contains(&node) => return,
            Some(_) => {}
        }

        // STEP 3-6: Rewind to the entry after the last marker or open element.
        let mut index = self.active_formatting_elements.len() - 1;
        while index > 0 {
            let previous = &self.active_formatting_elements[index - 1];
            let stop = previous
                .node_id()
                .is_none_or(|node| self.open_elements.contains(&node));
            if stop {
                break;
            }
            index -= 1;
        }

        // STEP 7-10: "Advance... Create: Insert an HTML element for the token
        //             for which the element entry was created, to obtain new
        //             element. Replace the entry for entry in the list with an
        //             entry for new element."
        for entry_index in index..self.active_formatting_elements.len() {
            let ActiveFormattingElement::Element { token, .. } =
                &self.active_formatting_elements[entry_index]
            else {
                debug_assert!(false, "marker found while reconstructing formatting elements");
                continue;
            };
            let token = token.clone();
            let node_id = self.insert_element(&token);
            self.active_formatting_elements[entry_index] =
                ActiveFormattingElement::Element { node_id, token };
        }
    }

    /// [§ 13.2.6.4.7 Adoption agency algorithm](https://html.spec.whatwg.org/multipage/parsing.html#adoption-agency-algorithm)
    ///
    /// Run for an end tag named `subject`. Returns false when the caller should
    /// instead "act as described in the "any other end tag" entry".
    pub(crate) fn run_adoption_agency(&mut self, subject: &str) -> bool {
        // STEP 2: "If the current node is an HTML element whose tag name is
        //          subject, and the current node is not in the list of active
        //          formatting elements, then pop the current node off the stack
        //          of open elements and return."
        if let Some(current) = self.current_node()
            && self.is_html_named(current, subject)
            && self.formatting_position(current).is_none()
        {
            let _ = self.pop();
            return true;
        }

        // STEP 3-4: "Let outer loop counter be 0. Outer loop: If outer loop
        //            counter is greater than or equal to 8, then return."
        for _ in 0..8 {
            // STEP 4.3: "Let formatting element be the last element in the list
            //            of active formatting elements that is between the end of
            //            the list and the last marker in the list, if any, or the
            //            start of the list otherwise, and has the tag name subject.
            //            If there is no such element, then return and instead act
            //            as described in the "any other end tag" entry above."
            let Some((formatting_index, formatting_element)) = self.last_formatting_element_named(subject)
            else {
                return false;
            };

            // STEP 4.4: "If formatting element is not in the stack of open
            //            elements, then this is a parse error; remove the element
            //            from the list, and return."
            let Some(formatting_stack_index) = self.stack_position(formatting_element) else {
                self.error(format_args!("Formatting element <{subject}> is not open"));
                let _ = self.active_formatting_elements.remove(formatting_index);
                return true;
            };

            // STEP 4.5: "If formatting element is in the stack of open elements,
            //            but the element is not in scope, then this is a parse
            //            error; return."
            if !self.has_node_in_scope(formatting_element) {
                self.error(format_args!("Formatting element <{subject}> is not in scope"));
                return true;
            }

            // STEP 4.6: "If formatting element is not the current node, this is a
            //            parse error. (But do not return.)"
            if self.current_node() != Some(formatting_element) {
                self.error(format_args!("Misnested end tag </{subject}>"));
            }

            // STEP 4.7: "Let furthest block be the topmost node in the stack of
            //            open elements that is lower in the stack than formatting
            //            element, and is an element in the special category."
            let furthest_block_index = (formatting_stack_index + 1..self.open_elements.len())
                .find(|&i| self.is_special(self.open_elements[i]));

            // STEP 4.8: "If there is no furthest block, then the UA must first pop
            //            all the nodes from the bottom of the stack of open
            //            elements, from the current node up to and including
            //            formatting element, then remove formatting element from
            //            the list of active formatting elements, and finally return."
            let Some(mut furthest_block_index) = furthest_block_index else {
                self.open_elements.truncate(formatting_stack_index);
                let _ = self.active_formatting_elements.remove(formatting_index);
                return true;
            };
            let furthest_block = self.open_elements[furthest_block_index];

            // STEP 4.9: "Let common ancestor be the element immediately above
            //            formatting element in the stack of open elements."
            let Some(common_ancestor) = formatting_stack_index
                .checked_sub(1)
                .map(|i| self.open_elements[i])
            else {
                debug_assert!(false, "formatting element at the top of the stack");
                return true;
            };

            // STEP 4.10: "Let a bookmark note the position of formatting element
            //             in the list of active formatting elements relative to
            //             the elements on either side of it in the list."
            let mut bookmark = formatting_index;

            // STEP 4.11: "Let node and last node be furthest block."
            let mut node_index = furthest_block_index;
            let mut last_node = furthest_block;

            // STEP 4.12-13: "Let inner loop counter be 0. Inner loop:"
            let mut inner_loop_counter = 0;
            loop {
                // STEP 4.13.1: "Increment inner loop counter by 1."
                inner_loop_counter += 1;

                // STEP 4.13.2: "Let node be the element immediately above node in
                //               the stack of open elements, or if node is no
                //               longer in the stack of open elements (e.g. because
                //               it got removed by this algorithm), the element that
                //               was immediately above node in the stack of open
                //               elements before node was removed."
                node_index -= 1;
                let node = self.open_elements[node_index];

                // STEP 4.13.3: "If node is formatting element, then break."
                if node == formatting_element {
                    break;
                }

                // STEP 4.13.4: "If inner loop counter is greater than 3 and node is
                //               in the list of active formatting elements, then
                //               remove node from the list of active formatting elements."
                let mut node_formatting_index = self.formatting_position(node);
                if inner_loop_counter > 3
                    && let Some(index) = node_formatting_index
                {
                    let _ = self.active_formatting_elements.remove(index);
                    if index < bookmark {
                        bookmark -= 1;
                    }
                    node_formatting_index = None;
                }

                // STEP 4.13.5: "If node is not in the list of active formatting
                //               elements, then remove node from the stack of open
                //               elements and continue."
                let Some(node_formatting_index) = node_formatting_index else {
                    let _ = self.open_elements.remove(node_index);
                    furthest_block_index -= 1;
                    continue;
                };

                // STEP 4.13.6: "Create an element for the token for which the
                //               element node was created, in the HTML namespace,
                //               with common ancestor as the intended parent;
                //               replace the entry for node in the list of active
                //               formatting elements with an entry for the new
                //               element, replace the entry for node in the stack of
                //               open elements with an entry for the new element, and
                //               let node be the new element."
                let ActiveFormattingElement::Element { token, .. } =
                    &self.active_formatting_elements[node_formatting_index]
                else {
                    debug_assert!(false, "formatting position pointed at a marker");
                    return true;
                };
                let token = token.clone();
                let new_element = self.create_element_for_token(&token);
                self.active_formatting_elements[node_formatting_index] = ActiveFormattingElement::Element {
                    node_id: new_element,
                    token,
                };
                self.open_elements[node_index] = new_element;

                // STEP 4.13.7: "If last node is furthest block, then move the
                //               aforementioned bookmark to be immediately after the
                //               new node in the list of active formatting elements."
                if last_node == furthest_block {
                    bookmark = node_formatting_index + 1;
                }

                // STEP 4.13.8: "Append last node to node."
                self.sink.detach(last_node);
                self.sink.append(new_element, last_node);

                // STEP 4.13.9: "Set last node to node."
                last_node = new_element;
            }

            // STEP 4.14: "Insert whatever last node ended up being in the previous
            //             step at the appropriate place for inserting a node, but
            //             using common ancestor as the override target."
            // Content relocated to a table section is always foster parented.
            self.sink.detach(last_node);
            let location = if self
                .is_html_named_one_of(common_ancestor, &["table", "tbody", "tfoot", "thead", "tr"])
            {
                self.foster_parent_location()
            } else {
                (common_ancestor, None)
            };
            self.insert_node_at(location, last_node);

            // STEP 4.15: "Create an element for the token for which formatting
            //             element was created, in the HTML namespace, with furthest
            //             block as the intended parent."
            let Some(formatting_index) = self.formatting_position(formatting_element) else {
                debug_assert!(false, "formatting element left the list during adoption");
                return true;
            };
            let ActiveFormattingElement::Element { token, .. } =
                &self.active_formatting_elements[formatting_index]
            else {
                return true;
            };
            let token = token.clone();
            let new_element = self.create_element_for_token(&token);

            // STEP 4.16: "Take all of the child nodes of furthest block and append
            //             them to the element created in the last step."
            self.sink.reparent_children(furthest_block, new_element);

            // STEP 4.17: "Append that new element to furthest block."
            self.sink.append(furthest_block, new_element);

            // STEP 4.18: "Remove formatting element from the list of active
            //             formatting elements, and insert the new element into the
            //             list of active formatting elements at the position of the
            //             aforementioned bookmark."
            let _ = self.active_formatting_elements.remove(formatting_index);
            if formatting_index < bookmark {
                bookmark -= 1;
            }
            let bookmark = bookmark.min(self.active_formatting_elements.len());
            self.active_formatting_elements.insert(
                bookmark,
                ActiveFormattingElement::Element {
                    node_id: new_element,
                    token,
                },
            );

            // STEP 4.19: "Remove formatting element from the stack of open
            //             elements, and insert the new element into the stack of
            //             open elements immediately below the position of furthest
            //             block in that stack."
            self.remove_from_stack(formatting_element);
            furthest_block_index -= 1;
            debug_assert_eq!(self.open_elements.get(furthest_block_index), Some(&furthest_block));
            self.open_elements.insert(furthest_block_index + 1, new_element);
        }
        true
    }
}
