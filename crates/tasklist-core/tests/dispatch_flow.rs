use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::Rc;

use tasklist_core::{
    Action, ActionKind, CardAction, CardMode, ClickTarget, DispatchError, Dispatcher, DraftFields,
    EditFields, Gateway, GatewayError, PreferenceError, PreferenceStore, Settings, Theme, UiEvent,
    View, bootstrap_theme, classify,
};
use tasklist_shared::{Category, TaskCreate, TaskDto, TaskPatch};
use tokio::sync::Notify;
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq)]
enum Event {
    InitialRender(usize),
    Append(Uuid),
    ClearVisible,
    Move(Uuid, Category),
    Remove(Uuid),
    Mode(Uuid, CardMode),
    Text(Uuid, EditFields),
    OpenForm(String),
    CloseForm,
    ApplyTheme(Theme),
    Icon(Theme),
    Confirm(String),
    Alert(String),
    Error(String),
    List(Option<String>),
    Create(TaskCreate),
    Update(Uuid, TaskPatch),
    Delete(Uuid),
}

type Log = Rc<RefCell<Vec<Event>>>;

struct FakeView {
    log: Log,
    cards: RefCell<Vec<(Uuid, Category)>>,
    form: RefCell<Option<DraftFields>>,
    scratch: RefCell<String>,
    confirm_answer: Cell<bool>,
    edit_fields: RefCell<HashMap<Uuid, EditFields>>,
    dark: Cell<bool>,
}

impl FakeView {
    fn new(log: Log) -> Self {
        Self {
            log,
            cards: RefCell::new(vec![]),
            form: RefCell::new(None),
            scratch: RefCell::new(String::new()),
            confirm_answer: Cell::new(true),
            edit_fields: RefCell::new(HashMap::new()),
            dark: Cell::new(false),
        }
    }

    fn push(&self, event: Event) {
        self.log.borrow_mut().push(event);
    }

    fn card_ids(&self) -> Vec<Uuid> {
        self.cards.borrow().iter().map(|(id, _)| *id).collect()
    }

    fn category_of(&self, id: Uuid) -> Option<Category> {
        self.cards
            .borrow()
            .iter()
            .find(|(card, _)| *card == id)
            .map(|(_, category)| *category)
    }

    fn fill_form(&self, title: &str, duedate: &str, description: &str) {
        *self.form.borrow_mut() = Some(DraftFields {
            title: title.to_string(),
            duedate: duedate.to_string(),
            description: description.to_string(),
        });
    }
}

impl View for FakeView {
    fn initial_render(&self, tasks: &[TaskDto]) {
        *self.cards.borrow_mut() = tasks.iter().map(|task| (task.id, task.category)).collect();
        self.push(Event::InitialRender(tasks.len()));
    }

    fn append_task(&self, task: &TaskDto) {
        self.cards.borrow_mut().push((task.id, task.category));
        self.push(Event::Append(task.id));
    }

    fn clear_all_tasks(&self) {
        self.cards.borrow_mut().clear();
        self.push(Event::ClearVisible);
    }

    fn move_card(&self, id: Uuid, category: Category) {
        for card in self.cards.borrow_mut().iter_mut() {
            if card.0 == id {
                card.1 = category;
            }
        }
        self.push(Event::Move(id, category));
    }

    fn remove_card(&self, id: Uuid) {
        self.cards.borrow_mut().retain(|(card, _)| *card != id);
        self.push(Event::Remove(id));
    }

    fn show_card_mode(&self, id: Uuid, mode: CardMode) {
        self.push(Event::Mode(id, mode));
    }

    fn update_card_text(&self, id: Uuid, fields: &EditFields) {
        self.push(Event::Text(id, fields.clone()));
    }

    fn read_edit_fields(&self, id: Uuid) -> Option<EditFields> {
        self.edit_fields.borrow().get(&id).cloned()
    }

    fn is_input_form_open(&self) -> bool {
        self.form.borrow().is_some()
    }

    fn scratch_input(&self) -> String {
        self.scratch.borrow().clone()
    }

    fn open_input_form(&self, prefill: &str) {
        *self.form.borrow_mut() = Some(DraftFields {
            title: prefill.to_string(),
            ..DraftFields::default()
        });
        self.push(Event::OpenForm(prefill.to_string()));
    }

    fn read_input_form(&self) -> DraftFields {
        self.form.borrow().clone().unwrap_or_default()
    }

    fn close_input_form(&self) {
        *self.form.borrow_mut() = None;
        self.push(Event::CloseForm);
    }

    fn apply_theme(&self, theme: Theme) {
        self.dark.set(theme.is_dark());
        self.push(Event::ApplyTheme(theme));
    }

    fn update_theme_icon(&self, theme: Theme) {
        self.push(Event::Icon(theme));
    }

    fn confirm(&self, message: &str) -> bool {
        self.push(Event::Confirm(message.to_string()));
        self.confirm_answer.get()
    }

    fn alert(&self, message: &str) {
        self.push(Event::Alert(message.to_string()));
    }

    fn show_error(&self, message: &str) {
        self.push(Event::Error(message.to_string()));
    }
}

struct FakeGateway {
    log: Log,
    tasks: RefCell<Vec<TaskDto>>,
    gate: RefCell<Option<Rc<Notify>>>,
    fail_list: Cell<bool>,
    fail_create: Cell<bool>,
    fail_delete_after: Cell<Option<usize>>,
    deletes: Cell<usize>,
}

impl FakeGateway {
    fn new(log: Log) -> Self {
        Self {
            log,
            tasks: RefCell::new(vec![]),
            gate: RefCell::new(None),
            fail_list: Cell::new(false),
            fail_create: Cell::new(false),
            fail_delete_after: Cell::new(None),
            deletes: Cell::new(0),
        }
    }

    fn seed(&self, titles: &[&str]) -> Vec<Uuid> {
        let mut ids = vec![];
        for title in titles {
            let seeded = task(title);
            ids.push(seeded.id);
            self.tasks.borrow_mut().push(seeded);
        }
        ids
    }

    fn hold_calls(&self, gate: Rc<Notify>) {
        *self.gate.borrow_mut() = Some(gate);
    }

    async fn wait_for_gate(&self) {
        let gate = self.gate.borrow().clone();
        if let Some(gate) = gate {
            gate.notified().await;
        }
    }

    fn push(&self, event: Event) {
        self.log.borrow_mut().push(event);
    }
}

impl Gateway for FakeGateway {
    async fn list_tasks(&self, filter: Option<&str>) -> Result<Vec<TaskDto>, GatewayError> {
        self.push(Event::List(filter.map(str::to_string)));
        if self.fail_list.get() {
            return Err(GatewayError::Invoke("backend offline".to_string()));
        }
        Ok(self.tasks.borrow().clone())
    }

    async fn create_task(&self, draft: TaskCreate) -> Result<TaskDto, GatewayError> {
        self.push(Event::Create(draft.clone()));
        if self.fail_create.get() {
            return Err(GatewayError::Rejected("title is required".to_string()));
        }
        let created = TaskDto {
            id: Uuid::new_v4(),
            title: draft.title,
            duedate: draft.duedate,
            description: draft.description,
            category: draft.category,
        };
        self.tasks.borrow_mut().push(created.clone());
        Ok(created)
    }

    async fn update_task(&self, id: Uuid, patch: TaskPatch) -> Result<(), GatewayError> {
        self.push(Event::Update(id, patch));
        self.wait_for_gate().await;
        Ok(())
    }

    async fn delete_task(&self, id: Uuid) -> Result<(), GatewayError> {
        self.push(Event::Delete(id));
        let done = self.deletes.get();
        if self.fail_delete_after.get() == Some(done) {
            return Err(GatewayError::Invoke("connection reset".to_string()));
        }
        self.deletes.set(done + 1);
        self.wait_for_gate().await;
        self.tasks.borrow_mut().retain(|task| task.id != id);
        Ok(())
    }
}

#[derive(Default)]
struct FakePrefs {
    map: RefCell<HashMap<String, String>>,
    fail_writes: Cell<bool>,
}

impl FakePrefs {
    fn with(key: &str, value: &str) -> Self {
        let prefs = Self::default();
        prefs.map.borrow_mut().insert(key.to_string(), value.to_string());
        prefs
    }
}

impl PreferenceStore for FakePrefs {
    fn get(&self, key: &str) -> Option<String> {
        self.map.borrow().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) -> Result<(), PreferenceError> {
        if self.fail_writes.get() {
            return Err(PreferenceError::Unavailable);
        }
        self.map.borrow_mut().insert(key.to_string(), value.to_string());
        Ok(())
    }
}

type TestDispatcher = Dispatcher<Rc<FakeGateway>, Rc<FakeView>, Rc<FakePrefs>>;

struct Harness {
    log: Log,
    view: Rc<FakeView>,
    gateway: Rc<FakeGateway>,
    prefs: Rc<FakePrefs>,
    dispatcher: TestDispatcher,
}

fn harness_with(prefs: FakePrefs) -> Harness {
    let log: Log = Rc::new(RefCell::new(vec![]));
    let view = Rc::new(FakeView::new(log.clone()));
    let gateway = Rc::new(FakeGateway::new(log.clone()));
    let prefs = Rc::new(prefs);
    let settings = Settings::default();
    let theme = bootstrap_theme(&prefs, &view, &settings);
    let dispatcher = Dispatcher::new(gateway.clone(), view.clone(), prefs.clone(), settings, theme);
    Harness {
        log,
        view,
        gateway,
        prefs,
        dispatcher,
    }
}

fn harness() -> Harness {
    harness_with(FakePrefs::default())
}

impl Harness {
    fn events(&self) -> Vec<Event> {
        self.log.borrow().clone()
    }

    fn gateway_events(&self) -> Vec<Event> {
        self.events()
            .into_iter()
            .filter(|event| {
                matches!(
                    event,
                    Event::List(_) | Event::Create(_) | Event::Update(..) | Event::Delete(_)
                )
            })
            .collect()
    }

    fn position(&self, wanted: &Event) -> usize {
        self.events()
            .iter()
            .position(|event| event == wanted)
            .unwrap_or_else(|| panic!("missing event {wanted:?}"))
    }

    fn clear_log(&self) {
        self.log.borrow_mut().clear();
    }
}

fn task(title: &str) -> TaskDto {
    TaskDto {
        id: Uuid::new_v4(),
        title: title.to_string(),
        duedate: None,
        description: String::new(),
        category: Category::InProgress,
    }
}

fn card(id: Uuid, action: CardAction) -> Action {
    Action::Card { id, action }
}

#[tokio::test]
async fn empty_initial_load_renders_zero_cards_without_error() {
    let h = harness();

    let count = h.dispatcher.boot().await.expect("boot");

    assert_eq!(count, 0);
    assert!(h.view.card_ids().is_empty());
    assert_eq!(
        h.events(),
        vec![Event::Icon(Theme::Light), Event::List(None), Event::InitialRender(0)]
    );
}

#[tokio::test]
async fn initial_load_renders_every_fetched_task() {
    let h = harness();
    let ids = h.gateway.seed(&["Laundry", "Groceries"]);

    let count = h.dispatcher.start().await.expect("start");

    assert_eq!(count, 2);
    assert_eq!(h.view.card_ids(), ids);
}

#[tokio::test]
async fn failed_initial_load_leaves_list_empty_and_reports_inline() {
    let h = harness();
    h.gateway.fail_list.set(true);

    let err = h.dispatcher.boot().await.expect_err("load should fail");

    assert!(matches!(err, DispatchError::Gateway { operation: "load tasks", .. }));
    assert!(h.view.card_ids().is_empty());
    assert!(matches!(h.events().last(), Some(Event::Error(message)) if message.contains("load tasks")));
    assert_eq!(h.gateway_events(), vec![Event::List(None)]);
}

#[tokio::test]
async fn stored_dark_theme_is_applied_before_startup() {
    let h = harness_with(FakePrefs::with("theme", "dark"));

    assert!(h.view.dark.get());
    assert_eq!(h.dispatcher.theme(), Theme::Dark);
    assert_eq!(h.events(), vec![Event::ApplyTheme(Theme::Dark)]);

    h.dispatcher.start().await.expect("start");
    assert!(h.events().contains(&Event::Icon(Theme::Dark)));
}

#[tokio::test]
async fn toggling_theme_twice_restores_class_and_stored_flag() {
    let h = harness_with(FakePrefs::with("theme", "light"));
    assert!(!h.view.dark.get());

    h.dispatcher.handle(Action::ToggleTheme).await.expect("toggle");
    assert!(h.view.dark.get());
    assert_eq!(h.prefs.get("theme").as_deref(), Some("dark"));
    assert!(h.events().contains(&Event::Icon(Theme::Dark)));

    h.dispatcher.handle(Action::ToggleTheme).await.expect("toggle back");
    assert!(!h.view.dark.get());
    assert_eq!(h.prefs.get("theme").as_deref(), Some("light"));
    assert_eq!(h.dispatcher.theme(), Theme::Light);
    assert!(h.gateway_events().is_empty());
}

#[tokio::test]
async fn theme_storage_failure_still_flips_the_page() {
    let h = harness();
    h.prefs.fail_writes.set(true);

    h.dispatcher.handle(Action::ToggleTheme).await.expect("toggle");

    assert!(h.view.dark.get());
    assert_eq!(h.prefs.get("theme"), None);
    assert!(!h.events().iter().any(|event| matches!(event, Event::Error(_))));
}

#[tokio::test]
async fn first_add_click_opens_prefilled_form_without_backend_calls() {
    let h = harness();
    *h.view.scratch.borrow_mut() = "Pay rent".to_string();

    h.dispatcher.handle(Action::Add).await.expect("open form");

    assert!(h.view.is_input_form_open());
    assert_eq!(h.view.read_input_form().title, "Pay rent");
    assert_eq!(h.events(), vec![Event::OpenForm("Pay rent".to_string())]);
}

#[tokio::test]
async fn empty_title_alerts_and_creates_nothing() {
    let h = harness();
    h.view.fill_form("", "2026-10-20", "notes");

    h.dispatcher.handle(Action::Add).await.expect("validation is not an error");

    assert_eq!(h.events(), vec![Event::Alert("Title required".to_string())]);
    assert!(h.view.card_ids().is_empty());
    assert!(h.view.is_input_form_open());
}

#[tokio::test]
async fn whitespace_title_is_created_as_typed() {
    let h = harness();
    h.view.fill_form("  padded  ", "", "");

    h.dispatcher.handle(Action::Add).await.expect("add");

    let created = h.gateway.tasks.borrow().clone();
    assert_eq!(created.len(), 1);
    assert_eq!(created[0].title, "  padded  ");
    assert_eq!(h.view.card_ids(), vec![created[0].id]);
    assert!(!h.events().iter().any(|event| matches!(event, Event::Alert(_))));
}

#[tokio::test]
async fn add_creates_once_and_renders_card_with_backend_id() {
    let h = harness();
    h.view.fill_form("Book dentist", "2026-10-20", "morning slot");

    h.dispatcher.handle(Action::Add).await.expect("add");

    let creates: Vec<TaskCreate> = h
        .events()
        .into_iter()
        .filter_map(|event| match event {
            Event::Create(draft) => Some(draft),
            _ => None,
        })
        .collect();
    assert_eq!(
        creates,
        vec![TaskCreate {
            title: "Book dentist".to_string(),
            duedate: Some("2026-10-20".to_string()),
            description: "morning slot".to_string(),
            category: Category::InProgress,
        }]
    );

    let stored = h.gateway.tasks.borrow().clone();
    assert_eq!(stored.len(), 1);
    assert_eq!(h.view.card_ids(), vec![stored[0].id]);
    assert!(!h.view.is_input_form_open());

    let closed = h.position(&Event::CloseForm);
    let created = h.position(&Event::Create(creates[0].clone()));
    let appended = h.position(&Event::Append(stored[0].id));
    assert!(closed < created && created < appended);
}

#[tokio::test]
async fn failed_create_closes_form_without_a_card() {
    let h = harness();
    h.gateway.fail_create.set(true);
    h.view.fill_form("Book dentist", "", "");

    let err = h.dispatcher.handle(Action::Add).await.expect_err("create fails");

    assert!(matches!(err, DispatchError::Gateway { operation: "create task", .. }));
    assert!(h.view.card_ids().is_empty());
    assert!(!h.view.is_input_form_open());
    assert!(matches!(h.events().last(), Some(Event::Error(_))));
}

#[tokio::test]
async fn checkbox_moves_card_before_update_resolves() {
    let h = harness();
    let ids = h.gateway.seed(&["Mow lawn"]);
    h.dispatcher.start().await.expect("start");
    let gate = Rc::new(Notify::new());
    h.gateway.hold_calls(gate.clone());

    let (result, ()) = tokio::join!(
        h.dispatcher.handle(card(ids[0], CardAction::SetDone(true))),
        async {
            tokio::task::yield_now().await;
            assert_eq!(h.view.category_of(ids[0]), Some(Category::Done));
            assert_eq!(h.gateway_events().last(), Some(&Event::Update(ids[0], TaskPatch::category(Category::Done))));
            gate.notify_one();
        }
    );
    result.expect("update");

    let moved = h.position(&Event::Move(ids[0], Category::Done));
    let updated = h.position(&Event::Update(ids[0], TaskPatch::category(Category::Done)));
    assert!(moved < updated);
}

#[tokio::test]
async fn unchecking_moves_card_back_to_in_progress() {
    let h = harness();
    let ids = h.gateway.seed(&["Mow lawn"]);
    h.dispatcher.start().await.expect("start");

    h.dispatcher.handle(card(ids[0], CardAction::SetDone(true))).await.expect("done");
    h.dispatcher.handle(card(ids[0], CardAction::SetDone(false))).await.expect("undone");

    assert_eq!(h.view.category_of(ids[0]), Some(Category::InProgress));
    assert_eq!(
        h.gateway_events().last(),
        Some(&Event::Update(ids[0], TaskPatch::category(Category::InProgress)))
    );
}

#[tokio::test]
async fn delete_removes_card_regardless_of_backend_latency() {
    let h = harness();
    let ids = h.gateway.seed(&["Old task", "Keep me"]);
    h.dispatcher.start().await.expect("start");
    let gate = Rc::new(Notify::new());
    h.gateway.hold_calls(gate.clone());

    let (result, ()) = tokio::join!(h.dispatcher.handle(card(ids[0], CardAction::Delete)), async {
        tokio::task::yield_now().await;
        assert_eq!(h.view.card_ids(), vec![ids[1]]);
        assert_eq!(h.gateway.tasks.borrow().len(), 2);
        gate.notify_one();
    });
    result.expect("delete");

    assert_eq!(h.gateway.tasks.borrow().len(), 1);
    assert!(h.position(&Event::Remove(ids[0])) < h.position(&Event::Delete(ids[0])));
}

#[tokio::test]
async fn clear_all_deletes_each_task_in_fetch_order() {
    let h = harness();
    let ids = h.gateway.seed(&["one", "two", "three"]);
    h.dispatcher.start().await.expect("start");
    h.clear_log();

    h.dispatcher.handle(Action::ClearAll).await.expect("clear");

    assert!(h.view.card_ids().is_empty());
    assert_eq!(
        h.events(),
        vec![
            Event::Confirm("Delete ALL tasks?".to_string()),
            Event::ClearVisible,
            Event::List(Some(String::new())),
            Event::Delete(ids[0]),
            Event::Delete(ids[1]),
            Event::Delete(ids[2]),
        ]
    );
    assert!(h.gateway.tasks.borrow().is_empty());
}

#[tokio::test]
async fn declined_clear_all_issues_no_calls() {
    let h = harness();
    h.gateway.seed(&["one", "two"]);
    h.dispatcher.start().await.expect("start");
    h.clear_log();
    h.view.confirm_answer.set(false);

    h.dispatcher.handle(Action::ClearAll).await.expect("declined");

    assert_eq!(h.events(), vec![Event::Confirm("Delete ALL tasks?".to_string())]);
    assert_eq!(h.view.card_ids().len(), 2);
}

#[tokio::test]
async fn clear_all_stops_at_first_failed_delete() {
    let h = harness();
    let ids = h.gateway.seed(&["one", "two", "three"]);
    h.gateway.fail_delete_after.set(Some(1));

    let err = h.dispatcher.handle(Action::ClearAll).await.expect_err("partial clear");

    assert!(matches!(err, DispatchError::ClearIncomplete { deleted: 1, total: 3, .. }));
    let deletes: Vec<Event> = h
        .gateway_events()
        .into_iter()
        .filter(|event| matches!(event, Event::Delete(_)))
        .collect();
    assert_eq!(deletes, vec![Event::Delete(ids[0]), Event::Delete(ids[1])]);
    assert_eq!(h.gateway.tasks.borrow().len(), 2);
    assert!(matches!(h.events().last(), Some(Event::Error(message)) if message.contains("1 of 3")));
}

#[tokio::test]
async fn edit_then_save_updates_text_and_sends_three_fields() {
    let h = harness();
    let ids = h.gateway.seed(&["Draft"]);
    h.dispatcher.start().await.expect("start");
    h.clear_log();

    h.dispatcher.handle(card(ids[0], CardAction::Edit)).await.expect("edit");
    let edited = EditFields {
        title: "Final".to_string(),
        duedate: "2026-11-01".to_string(),
        description: "ship it".to_string(),
    };
    h.view.edit_fields.borrow_mut().insert(ids[0], edited.clone());
    h.dispatcher.handle(card(ids[0], CardAction::Save)).await.expect("save");

    let expected_patch = TaskPatch {
        title: Some("Final".to_string()),
        duedate: Some("2026-11-01".to_string()),
        description: Some("ship it".to_string()),
        category: None,
    };
    assert_eq!(
        h.events(),
        vec![
            Event::Mode(ids[0], CardMode::Edit),
            Event::Text(ids[0], edited),
            Event::Mode(ids[0], CardMode::Normal),
            Event::Update(ids[0], expected_patch),
        ]
    );
}

#[tokio::test]
async fn save_with_empty_title_persists_it_as_typed() {
    let h = harness();
    let ids = h.gateway.seed(&["Keep"]);
    h.dispatcher.start().await.expect("start");
    h.clear_log();

    h.view.edit_fields.borrow_mut().insert(ids[0], EditFields::default());
    h.dispatcher.handle(card(ids[0], CardAction::Save)).await.expect("save");

    let expected_patch = TaskPatch {
        title: Some(String::new()),
        duedate: Some(String::new()),
        description: Some(String::new()),
        category: None,
    };
    assert_eq!(
        h.events(),
        vec![
            Event::Text(ids[0], EditFields::default()),
            Event::Mode(ids[0], CardMode::Normal),
            Event::Update(ids[0], expected_patch),
        ]
    );
}

#[tokio::test]
async fn save_without_edit_inputs_is_ignored() {
    let h = harness();
    let id = Uuid::new_v4();

    h.dispatcher.handle(card(id, CardAction::Save)).await.expect("ignored");

    assert!(h.events().is_empty());
}

#[tokio::test]
async fn view_and_close_only_switch_card_mode() {
    let h = harness();
    let id = Uuid::new_v4();

    h.dispatcher.handle(card(id, CardAction::View)).await.expect("view");
    h.dispatcher.handle(card(id, CardAction::Close)).await.expect("close");

    assert_eq!(
        h.events(),
        vec![Event::Mode(id, CardMode::Expanded), Event::Mode(id, CardMode::Normal)]
    );
}

#[tokio::test]
async fn classified_clicks_drive_the_dispatcher() {
    let h = harness();
    let ids = h.gateway.seed(&["Walk dog"]);
    h.dispatcher.start().await.expect("start");

    let resolved = classify(&UiEvent::Click(ClickTarget {
        action: Some(ActionKind::Check),
        card_id: Some(ids[0]),
        checked: true,
        ..ClickTarget::default()
    }));
    assert!(!resolved.prevent_default);

    let action = resolved.action.expect("checkbox action");
    h.dispatcher.handle(action).await.expect("dispatch");
    assert_eq!(h.view.category_of(ids[0]), Some(Category::Done));
}
