//! Stack of open elements: scope queries, popping and mode reset.
//!
//! [§ 13.2.4.2 The stack of open elements](https://html.spec.whatwg.org/multipage/parsing.html#the-stack-of-open-elements)

use lark_dom::{NodeId, TreeSink};

use super::core::{HTMLTreeBuilder, InsertionMode};

/// [§ 13.2.4.2](https://html.spec.whatwg.org/multipage/parsing.html#has-an-element-in-scope)
///
/// "The stack of open elements is said to have a particular element in scope
/// when it has that element in the specific scope consisting of the following
/// element types: applet, caption, html, table, td, th, marquee, object,
/// template" plus the MathML and SVG integration points listed below.
const SCOPE_BOUNDARIES: &[&str] = &[
    "applet", "caption", "html", "table", "td", "th", "marquee", "object", "template",
];

/// Foreign elements that bound the default, list item and button scopes.
const FOREIGN_SCOPE_BOUNDARIES: &[&str] = &[
    "mi", "mo", "mn", "ms", "mtext", "annotation-xml", "foreignobject", "desc", "title",
];

/// [§ 13.2.6.3 Closing elements that have implied end tags](https://html.spec.whatwg.org/multipage/parsing.html#generate-implied-end-tags)
///
/// "while the current node is a dd element, a dt element, an li element, an
/// optgroup element, an option element, a p element, an rb element, an rp
/// element, an rt element, or an rtc element, the UA must pop the current
/// node off the stack of open elements."
const IMPLIED_END_TAGS: &[&str] = &[
    "dd", "dt", "li", "optgroup", "option", "p", "rb", "rp", "rt", "rtc",
];

/// [§ 13.2.6.3](https://html.spec.whatwg.org/multipage/parsing.html#generate-all-implied-end-tags-thoroughly)
const IMPLIED_END_TAGS_THOROUGHLY: &[&str] = &[
    "caption", "colgroup", "dd", "dt", "li", "optgroup", "option", "p", "rb", "rp", "rt", "rtc",
    "tbody", "td", "tfoot", "th", "thead", "tr",
];

/// Which boundary set a scope query stops at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Scope {
    Default,
    ListItem,
    Button,
    Table,
    Select,
}

impl<S: TreeSink> HTMLTreeBuilder<S> {
    /// [§ 13.2.4.2](https://html.spec.whatwg.org/multipage/parsing.html#has-an-element-in-the-specific-scope)
    ///
    /// "The stack of open elements is said to have an element target node in
    /// a specific scope consisting of a list of element types list when the
    /// following algorithm terminates in a match state"
    fn has_in_specific_scope(&self, matches: impl Fn(NodeId) -> bool, scope: Scope) -> bool {
        // STEP 1: "Initialize node to be the current node (the bottommost node of the stack)."
        for &node in self.open_elements.iter().rev() {
            // STEP 2: "If node is the target node, terminate in a match state."
            if matches(node) {
                return true;
            }

            // STEP 3: "Otherwise, if node is one of the element types in list,
            //          terminate in a failure state."
            let name = self.node_name(node);
            let boundary = if self.is_foreign(node) {
                scope != Scope::Table
                    && scope != Scope::Select
                    && FOREIGN_SCOPE_BOUNDARIES.contains(&name)
            } else {
                match scope {
                    Scope::Default => SCOPE_BOUNDARIES.contains(&name),
                    Scope::ListItem => {
                        SCOPE_BOUNDARIES.contains(&name) || matches!(name, "ol" | "ul")
                    }
                    Scope::Button => SCOPE_BOUNDARIES.contains(&name) || name == "button",
                    Scope::Table => matches!(name, "html" | "table" | "template"),
                    // "consisting of all element types except the following:
                    //  optgroup in the HTML namespace, option in the HTML namespace"
                    Scope::Select => !matches!(name, "optgroup" | "option"),
                }
            };
            if boundary {
                return false;
            }
            // STEP 4: "Otherwise, set node to the previous entry in the stack
            //          of open elements and return to step 2."
        }
        false
    }

    fn has_named_in_scope(&self, names: &[&str], scope: Scope) -> bool {
        self.has_in_specific_scope(|node| self.is_html_named_one_of(node, names), scope)
    }

    /// [§ 13.2.4.2](https://html.spec.whatwg.org/multipage/parsing.html#has-an-element-in-scope)
    pub fn has_element_in_scope(&self, name: &str) -> bool {
        self.has_named_in_scope(&[name], Scope::Default)
    }

    /// True if any element named in `names` is in scope.
    pub fn has_any_element_in_scope(&self, names: &[&str]) -> bool {
        self.has_named_in_scope(names, Scope::Default)
    }

    /// True if the given node is in scope.
    pub(crate) fn has_node_in_scope(&self, target: NodeId) -> bool {
        self.has_in_specific_scope(|node| node == target, Scope::Default)
    }

    /// [§ 13.2.4.2](https://html.spec.whatwg.org/multipage/parsing.html#has-an-element-in-list-item-scope)
    pub fn has_element_in_list_item_scope(&self, name: &str) -> bool {
        self.has_named_in_scope(&[name], Scope::ListItem)
    }

    /// [§ 13.2.4.2](https://html.spec.whatwg.org/multipage/parsing.html#has-an-element-in-button-scope)
    pub fn has_element_in_button_scope(&self, name: &str) -> bool {
        self.has_named_in_scope(&[name], Scope::Button)
    }

    /// [§ 13.2.4.2](https://html.spec.whatwg.org/multipage/parsing.html#has-an-element-in-table-scope)
    ///
    /// ```
    /// use lark_html::{HTMLTreeBuilder, ParserSettings};
    ///
    /// let mut builder = HTMLTreeBuilder::new("<table><tr><td>x", &ParserSettings::default())?;
    /// while builder.step() {}
    /// assert!(builder.has_element_in_table_scope("td"));
    /// assert!(!builder.has_element_in_table_scope("body"));
    /// # Ok::<(), lark_html::HtmlError>(())
    /// ```
    pub fn has_element_in_table_scope(&self, name: &str) -> bool {
        self.has_named_in_scope(&[name], Scope::Table)
    }

    /// True if any element named in `names` is in table scope.
    pub fn has_any_element_in_table_scope(&self, names: &[&str]) -> bool {
        self.has_named_in_scope(names, Scope::Table)
    }

    /// [§ 13.2.4.2](https://html.spec.whatwg.org/multipage/parsing.html#has-an-element-in-select-scope)
    pub fn has_element_in_select_scope(&self, name: &str) -> bool {
        self.has_named_in_scope(&[name], Scope::Select)
    }

    /// True if an HTML element named `name` is anywhere on the stack.
    pub(crate) fn stack_contains(&self, name: &str) -> bool {
        self.open_elements
            .iter()
            .any(|&node| self.is_html_named(node, name))
    }

    pub(crate) fn stack_position(&self, node: NodeId) -> Option<usize> {
        self.open_elements.iter().rposition(|&n| n == node)
    }

    /// Remove `node` from wherever it sits in the stack.
    pub(crate) fn remove_from_stack(&mut self, node: NodeId) {
        if let Some(index) = self.stack_position(node) {
            let _ = self.open_elements.remove(index);
        }
    }

    /// Pop elements until an HTML element named `name` has been popped.
    pub(crate) fn pop_until_named(&mut self, name: &str) {
        self.pop_until_one_of(&[name]);
    }

    /// Pop elements until an HTML element named one of `names` has been popped.
    pub(crate) fn pop_until_one_of(&mut self, names: &[&str]) {
        while let Some(node) = self.pop() {
            if self.is_html_named_one_of(node, names) {
                return;
            }
        }
    }

    /// Pop elements until `target` has been popped.
    pub(crate) fn pop_until_node(&mut self, target: NodeId) {
        while let Some(node) = self.pop() {
            if node == target {
                return;
            }
        }
    }

    /// [§ 13.2.6.3](https://html.spec.whatwg.org/multipage/parsing.html#generate-implied-end-tags)
    ///
    /// Pop elements with optional end tags, stopping at `except` if given.
    pub(crate) fn generate_implied_end_tags(&mut self, except: Option<&str>) {
        while let Some(node) = self.current_node() {
            if !self.is_html_named_one_of(node, IMPLIED_END_TAGS)
                || except.is_some_and(|name| self.is_html_named(node, name))
            {
                return;
            }
            let _ = self.pop();
        }
    }

    /// [§ 13.2.6.3](https://html.spec.whatwg.org/multipage/parsing.html#generate-all-implied-end-tags-thoroughly)
    pub(crate) fn generate_all_implied_end_tags_thoroughly(&mut self) {
        while self.current_node_is_one_of(IMPLIED_END_TAGS_THOROUGHLY) {
            let _ = self.pop();
        }
    }

    /// [§ 13.2.6.4.9](https://html.spec.whatwg.org/multipage/parsing.html#clear-the-stack-back-to-a-table-context)
    ///
    /// "While the current node is not a table, template, or html element, pop
    /// elements from the stack of open elements."
    pub(crate) fn clear_stack_back_to_table_context(&mut self) {
        self.clear_stack_back_to(&["table", "template", "html"]);
    }

    /// [§ 13.2.6.4.13](https://html.spec.whatwg.org/multipage/parsing.html#clear-the-stack-back-to-a-table-body-context)
    pub(crate) fn clear_stack_back_to_table_body_context(&mut self) {
        self.clear_stack_back_to(&["tbody", "tfoot", "thead", "template", "html"]);
    }

    /// [§ 13.2.6.4.14](https://html.spec.whatwg.org/multipage/parsing.html#clear-the-stack-back-to-a-table-row-context)
    pub(crate) fn clear_stack_back_to_table_row_context(&mut self) {
        self.clear_stack_back_to(&["tr", "template", "html"]);
    }

    fn clear_stack_back_to(&mut self, names: &[&str]) {
        while let Some(node) = self.current_node() {
            if self.is_html_named_one_of(node, names) {
                return;
            }
            let _ = self.pop();
        }
    }

    /// [§ 13.2.4.1 Reset the insertion mode appropriately](https://html.spec.whatwg.org/multipage/parsing.html#reset-the-insertion-mode-appropriately)
    pub(crate) fn reset_insertion_mode(&mut self) {
        let mode = self.appropriate_insertion_mode();
        self.switch_mode(mode);
    }

    fn appropriate_insertion_mode(&self) -> InsertionMode {
        // STEP 1: "Let last be false."
        // STEP 2: "Let node be the last node in the stack of open elements."
        for index in (0..self.open_elements.len()).rev() {
            let mut node = self.open_elements[index];

            // STEP 4: "If node is the first node in the stack of open elements,
            //          then set last to true, and, if the parser was created as
            //          part of the HTML fragment parsing algorithm (fragment
            //          case), set node to the context element passed to that
            //          algorithm."
            let last = index == 0;
            if last && let Some(context) = self.context_element {
                node = context;
            }

            let name = if self.is_foreign(node) { "" } else { self.node_name(node) };
            match name {
                // STEP 5: "If node is a select element, run these substeps"
                "select" => {
                    if !last {
                        for &ancestor in self.open_elements[..index].iter().rev() {
                            if self.is_html_named(ancestor, "template") {
                                break;
                            }
                            if self.is_html_named(ancestor, "table") {
                                return InsertionMode::InSelectInTable;
                            }
                        }
                    }
                    return InsertionMode::InSelect;
                }
                // STEP 6: "If node is a td or th element and last is false, then
                //          switch the insertion mode to "in cell" and return."
                "td" | "th" if !last => return InsertionMode::InCell,
                // STEP 7
                "tr" => return InsertionMode::InRow,
                // STEP 8
                "tbody" | "thead" | "tfoot" => return InsertionMode::InTableBody,
                // STEP 9
                "caption" => return InsertionMode::InCaption,
                // STEP 10
                "colgroup" => return InsertionMode::InColumnGroup,
                // STEP 11
                "table" => return InsertionMode::InTable,
                // STEP 13: "If node is a head element and last is false, then
                //           switch the insertion mode to "in head" and return."
                "head" if !last => return InsertionMode::InHead,
                // STEP 14
                "body" => return InsertionMode::InBody,
                // STEP 15
                "frameset" => return InsertionMode::InFrameset,
                // STEP 16: "If node is an html element, run these substeps"
                "html" => {
                    return if self.head_element_pointer.is_none() {
                        InsertionMode::BeforeHead
                    } else {
                        InsertionMode::AfterHead
                    };
                }
                _ => {}
            }

            // STEP 17: "If last is true, then switch the insertion mode to "in
            //           body" and return. (fragment case)"
            if last {
                return InsertionMode::InBody;
            }
        }
        InsertionMode::InBody
    }
}
