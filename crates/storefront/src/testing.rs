//! Test doubles for the page, HTTP and runtime seams.
//!
//! - [`FakePage`]: arena-backed document with a small selector engine
//!   (tag, `#id`, `.class`, `[attr]`, `[attr="v"]`, `[attr^="v"]`, descendant
//!   combinator), recorded dialogs, and dispatchable events.
//! - [`FakeHttp`]: records every request synchronously and replays scripted
//!   responses.
//! - [`TestPlatform`]: both of the above on [`TokioRuntime`].
//!
//! Element markup and children are independent in [`FakePage`]: setting inner
//! HTML replaces the stored markup string but leaves child nodes alone.

use std::cell::RefCell;
use std::collections::{BTreeMap, VecDeque};
use std::future::Future;
use std::iter::Peekable;
use std::rc::Rc;
use std::str::Chars;

use crate::config::UiConfig;
use crate::context::{PageContext, Platform};
use crate::error::{Result, UiError};
use crate::http::{HttpClient, HttpResponse};
use crate::page::{EventKind, EventResponse, Handler, NewElement, Page};
use crate::runtime::TokioRuntime;

// =============================================================================
// Platform
// =============================================================================

/// In-memory page and scripted HTTP on the tokio runtime.
#[derive(Debug, Clone, Copy, Default)]
pub struct TestPlatform;

impl Platform for TestPlatform {
    type Page = FakePage;
    type Http = FakeHttp;
    type Runtime = TokioRuntime;
}

/// Context over `page` and `http` with the default configuration.
#[must_use]
pub fn test_context(page: &FakePage, http: &FakeHttp) -> PageContext<TestPlatform> {
    PageContext::new(page.clone(), http.clone(), TokioRuntime, UiConfig::default())
}

/// Let spawned local tasks run until they block on something not yet ready.
pub async fn settle() {
    for _ in 0..32 {
        tokio::task::yield_now().await;
    }
}

// =============================================================================
// FakePage
// =============================================================================

/// Handle to a node in a [`FakePage`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

/// Handle to a registered listener.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(usize);

/// Element description for [`FakePage::append`].
#[derive(Debug, Clone, Default)]
pub struct El {
    tag: String,
    attrs: BTreeMap<String, String>,
    value: String,
    html: String,
    disabled: bool,
}

impl El {
    #[must_use]
    pub fn new(tag: &str) -> Self {
        Self {
            tag: tag.to_ascii_lowercase(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn id(self, id: &str) -> Self {
        self.attr("id", id)
    }

    /// Add one or more space-separated classes.
    #[must_use]
    pub fn class(mut self, class: &str) -> Self {
        let merged = match self.attrs.get("class") {
            Some(existing) => format!("{existing} {class}"),
            None => class.to_string(),
        };
        self.attrs.insert("class".to_string(), merged);
        self
    }

    #[must_use]
    pub fn attr(mut self, name: &str, value: &str) -> Self {
        self.attrs.insert(name.to_string(), value.to_string());
        self
    }

    #[must_use]
    pub fn value(mut self, value: &str) -> Self {
        self.value = value.to_string();
        self
    }

    #[must_use]
    pub fn html(mut self, html: &str) -> Self {
        self.html = html.to_string();
        self
    }

    #[must_use]
    pub const fn disabled(mut self) -> Self {
        self.disabled = true;
        self
    }
}

#[derive(Debug, Clone)]
struct Node {
    tag: String,
    attrs: BTreeMap<String, String>,
    value: String,
    html: String,
    disabled: bool,
    style: BTreeMap<String, String>,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

struct Listener {
    element: NodeId,
    event: EventKind,
    handler: Handler<NodeId>,
}

struct PageState {
    nodes: Vec<Node>,
    root: NodeId,
    listeners: Vec<Option<Listener>>,
    alerts: Vec<String>,
    confirms: Vec<String>,
    confirm_answers: VecDeque<bool>,
    reloads: usize,
    prints: usize,
    scrolled: Vec<NodeId>,
    focused: Option<NodeId>,
}

/// In-memory document. Cloning shares the same document.
#[derive(Clone)]
pub struct FakePage {
    state: Rc<RefCell<PageState>>,
}

impl Default for FakePage {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for FakePage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.state.borrow();
        f.debug_struct("FakePage")
            .field("nodes", &state.nodes.len())
            .field("alerts", &state.alerts)
            .field("reloads", &state.reloads)
            .finish_non_exhaustive()
    }
}

impl FakePage {
    /// Empty document with a `<body>` root.
    #[must_use]
    pub fn new() -> Self {
        let body = Node {
            tag: "body".to_string(),
            attrs: BTreeMap::new(),
            value: String::new(),
            html: String::new(),
            disabled: false,
            style: BTreeMap::new(),
            parent: None,
            children: Vec::new(),
        };
        Self {
            state: Rc::new(RefCell::new(PageState {
                nodes: vec![body],
                root: NodeId(0),
                listeners: Vec::new(),
                alerts: Vec::new(),
                confirms: Vec::new(),
                confirm_answers: VecDeque::new(),
                reloads: 0,
                prints: 0,
                scrolled: Vec::new(),
                focused: None,
            })),
        }
    }

    #[must_use]
    pub fn body(&self) -> NodeId {
        self.state.borrow().root
    }

    /// Append a new element under `parent`.
    pub fn append(&self, parent: NodeId, el: El) -> NodeId {
        let mut state = self.state.borrow_mut();
        let id = NodeId(state.nodes.len());
        state.nodes.push(Node {
            tag: el.tag,
            attrs: el.attrs,
            value: el.value,
            html: el.html,
            disabled: el.disabled,
            style: BTreeMap::new(),
            parent: Some(parent),
            children: Vec::new(),
        });
        if let Some(node) = state.nodes.get_mut(parent.0) {
            node.children.push(id);
        }
        id
    }

    /// Run the listeners registered on `element` for `event`.
    ///
    /// Clicks on a disabled element are swallowed, as in a browser.
    pub fn dispatch(&self, element: NodeId, event: EventKind) -> EventResponse {
        if event == EventKind::Click && self.is_disabled(element) {
            return EventResponse::Continue;
        }

        let handlers: Vec<Handler<NodeId>> = self
            .state
            .borrow()
            .listeners
            .iter()
            .flatten()
            .filter(|l| l.element == element && l.event == event)
            .map(|l| Rc::clone(&l.handler))
            .collect();

        let mut response = EventResponse::Continue;
        for handler in handlers {
            if handler(&element) == EventResponse::PreventDefault {
                response = EventResponse::PreventDefault;
            }
        }
        response
    }

    pub fn click(&self, element: NodeId) -> EventResponse {
        self.dispatch(element, EventKind::Click)
    }

    /// Set the value and fire `input`, like a keystroke.
    pub fn type_into(&self, element: NodeId, value: &str) {
        self.set_value(&element, value);
        self.dispatch(element, EventKind::Input);
    }

    /// Set the value and fire `input` then `change`, like a committed edit.
    pub fn commit_value(&self, element: NodeId, value: &str) {
        self.type_into(element, value);
        self.dispatch(element, EventKind::Change);
    }

    /// Queue the answer for the next `confirm()` call. Unanswered prompts
    /// are declined.
    pub fn answer_confirm(&self, answer: bool) {
        self.state.borrow_mut().confirm_answers.push_back(answer);
    }

    #[must_use]
    pub fn alerts(&self) -> Vec<String> {
        self.state.borrow().alerts.clone()
    }

    #[must_use]
    pub fn confirms(&self) -> Vec<String> {
        self.state.borrow().confirms.clone()
    }

    #[must_use]
    pub fn reloads(&self) -> usize {
        self.state.borrow().reloads
    }

    #[must_use]
    pub fn prints(&self) -> usize {
        self.state.borrow().prints
    }

    #[must_use]
    pub fn scrolled(&self) -> Vec<NodeId> {
        self.state.borrow().scrolled.clone()
    }

    #[must_use]
    pub fn focused(&self) -> Option<NodeId> {
        self.state.borrow().focused
    }

    /// Number of live listeners.
    #[must_use]
    pub fn listener_count(&self) -> usize {
        self.state.borrow().listeners.iter().flatten().count()
    }

    #[must_use]
    pub fn is_disabled(&self, element: NodeId) -> bool {
        self.with_node(element, |n| n.disabled).unwrap_or(false)
    }

    #[must_use]
    pub fn has_class(&self, element: NodeId, class: &str) -> bool {
        self.with_node(element, |n| class_list(n).iter().any(|c| c == class))
            .unwrap_or(false)
    }

    #[must_use]
    pub fn style(&self, element: NodeId, property: &str) -> Option<String> {
        self.with_node(element, |n| n.style.get(property).cloned())
            .flatten()
    }

    #[must_use]
    pub fn html(&self, element: NodeId) -> String {
        self.inner_html(&element)
    }

    fn with_node<T>(&self, id: NodeId, f: impl FnOnce(&Node) -> T) -> Option<T> {
        self.state.borrow().nodes.get(id.0).map(f)
    }

    fn with_node_mut(&self, id: NodeId, f: impl FnOnce(&mut Node)) {
        if let Some(node) = self.state.borrow_mut().nodes.get_mut(id.0) {
            f(node);
        }
    }

    fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.with_node(id, |n| n.parent).flatten()
    }

    /// `id` and its descendants in document order.
    fn subtree(&self, id: NodeId) -> Vec<NodeId> {
        let state = self.state.borrow();
        let mut order = Vec::new();
        let mut stack = vec![id];
        while let Some(current) = stack.pop() {
            order.push(current);
            if let Some(node) = state.nodes.get(current.0) {
                stack.extend(node.children.iter().rev().copied());
            }
        }
        order
    }

    fn matches(&self, id: NodeId, selector: &[Compound]) -> bool {
        let Some((last, ancestors)) = selector.split_last() else {
            return false;
        };
        if !self.matches_compound(id, last) {
            return false;
        }

        let mut current = self.parent(id);
        for compound in ancestors.iter().rev() {
            loop {
                let Some(candidate) = current else {
                    return false;
                };
                current = self.parent(candidate);
                if self.matches_compound(candidate, compound) {
                    break;
                }
            }
        }
        true
    }

    fn matches_compound(&self, id: NodeId, compound: &Compound) -> bool {
        self.with_node(id, |node| compound.matches(node))
            .unwrap_or(false)
    }
}

fn class_list(node: &Node) -> Vec<String> {
    node.attrs
        .get("class")
        .map(|c| c.split_whitespace().map(String::from).collect())
        .unwrap_or_default()
}

impl Page for FakePage {
    type Element = NodeId;
    type Listener = ListenerId;

    fn query_all(&self, selector: &str) -> Vec<NodeId> {
        let parsed = parse_selector(selector);
        self.subtree(self.body())
            .into_iter()
            .filter(|id| self.matches(*id, &parsed))
            .collect()
    }

    fn element_by_id(&self, id: &str) -> Option<NodeId> {
        self.subtree(self.body()).into_iter().find(|node| {
            self.with_node(*node, |n| n.attrs.get("id").is_some_and(|v| v == id))
                .unwrap_or(false)
        })
    }

    fn query_within(&self, scope: &NodeId, selector: &str) -> Option<NodeId> {
        let parsed = parse_selector(selector);
        self.subtree(*scope)
            .into_iter()
            .skip(1)
            .find(|id| self.matches(*id, &parsed))
    }

    fn closest(&self, element: &NodeId, selector: &str) -> Option<NodeId> {
        let parsed = parse_selector(selector);
        let mut current = Some(*element);
        while let Some(id) = current {
            if self.matches(id, &parsed) {
                return Some(id);
            }
            current = self.parent(id);
        }
        None
    }

    fn is_connected(&self, element: &NodeId) -> bool {
        let root = self.body();
        let mut current = Some(*element);
        while let Some(id) = current {
            if id == root {
                return true;
            }
            current = self.parent(id);
        }
        false
    }

    fn attribute(&self, element: &NodeId, name: &str) -> Option<String> {
        self.with_node(*element, |n| n.attrs.get(name).cloned())
            .flatten()
    }

    fn set_attribute(&self, element: &NodeId, name: &str, value: &str) {
        self.with_node_mut(*element, |n| {
            n.attrs.insert(name.to_string(), value.to_string());
        });
    }

    fn value(&self, element: &NodeId) -> String {
        self.with_node(*element, |n| n.value.clone())
            .unwrap_or_default()
    }

    fn set_value(&self, element: &NodeId, value: &str) {
        self.with_node_mut(*element, |n| n.value = value.to_string());
    }

    fn inner_html(&self, element: &NodeId) -> String {
        self.with_node(*element, |n| n.html.clone())
            .unwrap_or_default()
    }

    fn set_inner_html(&self, element: &NodeId, html: &str) {
        self.with_node_mut(*element, |n| n.html = html.to_string());
    }

    fn set_text(&self, element: &NodeId, text: &str) {
        self.set_inner_html(element, text);
    }

    fn set_class_name(&self, element: &NodeId, class_name: &str) {
        self.set_attribute(element, "class", class_name);
    }

    fn add_class(&self, element: &NodeId, class: &str) {
        self.with_node_mut(*element, |n| {
            let mut classes = class_list(n);
            if !classes.iter().any(|c| c == class) {
                classes.push(class.to_string());
            }
            n.attrs.insert("class".to_string(), classes.join(" "));
        });
    }

    fn remove_class(&self, element: &NodeId, class: &str) {
        self.with_node_mut(*element, |n| {
            let classes: Vec<String> = class_list(n).into_iter().filter(|c| c != class).collect();
            n.attrs.insert("class".to_string(), classes.join(" "));
        });
    }

    fn set_style(&self, element: &NodeId, property: &str, value: &str) {
        self.with_node_mut(*element, |n| {
            n.style.insert(property.to_string(), value.to_string());
        });
    }

    fn set_disabled(&self, element: &NodeId, disabled: bool) {
        self.with_node_mut(*element, |n| n.disabled = disabled);
    }

    fn focus(&self, element: &NodeId) {
        self.state.borrow_mut().focused = Some(*element);
    }

    fn scroll_into_view(&self, element: &NodeId) {
        self.state.borrow_mut().scrolled.push(*element);
    }

    fn remove(&self, element: &NodeId) {
        let Some(parent) = self.parent(*element) else {
            return;
        };
        self.with_node_mut(parent, |p| p.children.retain(|c| c != element));
        self.with_node_mut(*element, |n| n.parent = None);
    }

    fn append_to_body(&self, element: NewElement<'_>) -> Option<NodeId> {
        let el = El::new(element.tag)
            .attr("class", element.class_name)
            .attr("style", element.style)
            .html(element.html);
        Some(self.append(self.body(), el))
    }

    fn form_action(&self, form: &NodeId) -> Option<String> {
        self.attribute(form, "action")
    }

    fn form_fields(&self, form: &NodeId) -> Vec<(String, String)> {
        self.subtree(*form)
            .into_iter()
            .skip(1)
            .filter_map(|id| {
                self.with_node(id, |n| {
                    let is_control = matches!(n.tag.as_str(), "input" | "select" | "textarea");
                    match n.attrs.get("name") {
                        Some(name) if is_control && !n.disabled => {
                            Some((name.clone(), n.value.clone()))
                        }
                        _ => None,
                    }
                })
                .flatten()
            })
            .collect()
    }

    fn listen(&self, element: &NodeId, event: EventKind, handler: Handler<NodeId>) -> ListenerId {
        let mut state = self.state.borrow_mut();
        state.listeners.push(Some(Listener {
            element: *element,
            event,
            handler,
        }));
        ListenerId(state.listeners.len() - 1)
    }

    fn unlisten(&self, listener: ListenerId) {
        if let Some(slot) = self.state.borrow_mut().listeners.get_mut(listener.0) {
            *slot = None;
        }
    }

    fn alert(&self, message: &str) {
        self.state.borrow_mut().alerts.push(message.to_string());
    }

    fn confirm(&self, message: &str) -> bool {
        let mut state = self.state.borrow_mut();
        state.confirms.push(message.to_string());
        state.confirm_answers.pop_front().unwrap_or(false)
    }

    fn reload(&self) {
        self.state.borrow_mut().reloads += 1;
    }

    fn print(&self) {
        self.state.borrow_mut().prints += 1;
    }
}

// =============================================================================
// Selector engine
// =============================================================================

#[derive(Debug, Default)]
struct Compound {
    tag: Option<String>,
    id: Option<String>,
    classes: Vec<String>,
    attrs: Vec<AttrTest>,
}

#[derive(Debug)]
enum AttrTest {
    Present(String),
    Equals(String, String),
    Prefix(String, String),
}

impl Compound {
    fn matches(&self, node: &Node) -> bool {
        if self.tag.as_ref().is_some_and(|tag| *tag != node.tag) {
            return false;
        }
        if self
            .id
            .as_ref()
            .is_some_and(|id| node.attrs.get("id") != Some(id))
        {
            return false;
        }
        let classes = class_list(node);
        if !self.classes.iter().all(|c| classes.contains(c)) {
            return false;
        }
        self.attrs.iter().all(|test| match test {
            AttrTest::Present(name) => node.attrs.contains_key(name),
            AttrTest::Equals(name, value) => node.attrs.get(name) == Some(value),
            AttrTest::Prefix(name, prefix) => node
                .attrs
                .get(name)
                .is_some_and(|v| v.starts_with(prefix.as_str())),
        })
    }
}

fn parse_selector(selector: &str) -> Vec<Compound> {
    selector.split_whitespace().map(parse_compound).collect()
}

fn parse_compound(text: &str) -> Compound {
    let mut compound = Compound::default();
    let mut chars = text.chars().peekable();

    let tag = take_ident(&mut chars);
    if !tag.is_empty() && tag != "*" {
        compound.tag = Some(tag.to_ascii_lowercase());
    }

    while let Some(c) = chars.next() {
        match c {
            '#' => compound.id = Some(take_ident(&mut chars)),
            '.' => compound.classes.push(take_ident(&mut chars)),
            '[' => {
                let inner: String = chars.by_ref().take_while(|c| *c != ']').collect();
                compound.attrs.push(parse_attr(&inner));
            }
            _ => {}
        }
    }
    compound
}

fn take_ident(chars: &mut Peekable<Chars<'_>>) -> String {
    let mut ident = String::new();
    while let Some(&c) = chars.peek() {
        if c.is_alphanumeric() || matches!(c, '-' | '_' | '*') {
            ident.push(c);
            chars.next();
        } else {
            break;
        }
    }
    ident
}

fn parse_attr(inner: &str) -> AttrTest {
    let unquote = |v: &str| v.trim().trim_matches(['"', '\'']).to_string();
    if let Some((name, value)) = inner.split_once("^=") {
        AttrTest::Prefix(name.trim().to_string(), unquote(value))
    } else if let Some((name, value)) = inner.split_once('=') {
        AttrTest::Equals(name.trim().to_string(), unquote(value))
    } else {
        AttrTest::Present(inner.trim().to_string())
    }
}

// =============================================================================
// FakeHttp
// =============================================================================

/// Body of a recorded request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RequestBody {
    Json(serde_json::Value),
    Multipart(Vec<(String, String)>),
}

/// A request as issued.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedRequest {
    pub url: String,
    pub body: RequestBody,
}

#[derive(Debug, Clone)]
enum Scripted {
    Respond(HttpResponse),
    Fail(String),
    Hang,
}

#[derive(Debug, Default)]
struct HttpState {
    requests: Vec<RecordedRequest>,
    script: VecDeque<Scripted>,
}

/// Recording HTTP client. Unscripted requests get `200` with an empty body.
#[derive(Debug, Clone, Default)]
pub struct FakeHttp {
    state: Rc<RefCell<HttpState>>,
}

impl FakeHttp {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a response.
    pub fn respond(&self, status: u16, body: &str) {
        self.push(Scripted::Respond(HttpResponse::new(status, body)));
    }

    /// Queue a JSON response.
    pub fn respond_json(&self, status: u16, json: &str) {
        self.respond(status, json);
    }

    /// Queue a transport failure.
    pub fn fail(&self, message: &str) {
        self.push(Scripted::Fail(message.to_string()));
    }

    /// Queue a request that never settles.
    pub fn hang(&self) {
        self.push(Scripted::Hang);
    }

    #[must_use]
    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.state.borrow().requests.clone()
    }

    #[must_use]
    pub fn request_count(&self) -> usize {
        self.state.borrow().requests.len()
    }

    fn push(&self, scripted: Scripted) {
        self.state.borrow_mut().script.push_back(scripted);
    }

    fn record(&self, url: &str, body: RequestBody) -> Scripted {
        let mut state = self.state.borrow_mut();
        state.requests.push(RecordedRequest {
            url: url.to_string(),
            body,
        });
        state
            .script
            .pop_front()
            .unwrap_or_else(|| Scripted::Respond(HttpResponse::new(200, "")))
    }
}

async fn play(scripted: Scripted) -> Result<HttpResponse> {
    match scripted {
        Scripted::Respond(response) => Ok(response),
        Scripted::Fail(message) => Err(UiError::Transport(message)),
        Scripted::Hang => {
            std::future::pending::<()>().await;
            Err(UiError::Transport("request never settled".to_string()))
        }
    }
}

impl HttpClient for FakeHttp {
    fn post_json(
        &self,
        url: &str,
        body: &serde_json::Value,
    ) -> impl Future<Output = Result<HttpResponse>> {
        play(self.record(url, RequestBody::Json(body.clone())))
    }

    fn post_multipart(
        &self,
        url: &str,
        fields: &[(String, String)],
    ) -> impl Future<Output = Result<HttpResponse>> {
        play(self.record(url, RequestBody::Multipart(fields.to_vec())))
    }
}
