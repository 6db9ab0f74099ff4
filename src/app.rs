//! Application state and core logic

use crate::share::{SharePage, SharePlatform, ShareController};
use crate::site::{
    ArticleDocument, Category, SiteApi, SiteError, SubmissionOutcome, SubscribePage,
};
use crate::state::{AppState, ArticleStatus, Focus, View};
use crate::subscription::{FollowUp, SubscriptionController};
use crate::ui::subscribe::scroll_for_focus;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::future::Future;
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};

/// Results of work done off the input loop
#[derive(Debug)]
pub enum BackgroundEvent {
    Submitted(Result<SubmissionOutcome, SiteError>),
    SubscribePageLoaded(Result<SubscribePage, SiteError>),
    CategoriesLoaded(Result<Vec<Category>, SiteError>),
    EmailChecked {
        email: String,
        result: Result<bool, SiteError>,
    },
    ArticleLoaded(Result<ArticleDocument, SiteError>),
}

/// Main application struct
pub struct App {
    /// Current application state
    pub state: AppState,
    pub subscription: SubscriptionController,
    pub share: ShareController,
    site: Arc<dyn SiteApi>,
    /// Article id or URL shown on the article view
    article: Option<String>,
    events_tx: UnboundedSender<BackgroundEvent>,
    events_rx: UnboundedReceiver<BackgroundEvent>,
    /// Whether the app should quit
    quit: bool,
}

impl App {
    pub fn new(site: Arc<dyn SiteApi>, share: ShareController, article: Option<String>) -> Self {
        let (events_tx, events_rx) = mpsc::unbounded_channel();
        Self {
            state: AppState::default(),
            subscription: SubscriptionController::new(),
            share,
            site,
            article,
            events_tx,
            events_rx,
            quit: false,
        }
    }

    /// Kick off the initial page loads
    pub fn start(&mut self) {
        self.load_subscribe_page();
        self.load_categories();
        self.load_article();
    }

    /// Check if app should quit
    pub fn should_quit(&self) -> bool {
        self.quit
    }

    /// Run `job` on the runtime and deliver its event to the input loop.
    /// A job that dies without an answer is reported through `on_abort`.
    fn spawn<F, Fut, A>(&self, job: F, on_abort: A)
    where
        F: FnOnce(Arc<dyn SiteApi>) -> Fut,
        Fut: Future<Output = BackgroundEvent> + Send + 'static,
        A: FnOnce(SiteError) -> BackgroundEvent + Send + 'static,
    {
        let handle = tokio::spawn(job(Arc::clone(&self.site)));
        let tx = self.events_tx.clone();
        tokio::spawn(async move {
            let event = match handle.await {
                Ok(event) => event,
                Err(e) => {
                    tracing::error!("Background job aborted: {e}");
                    on_abort(SiteError::Decode(format!("background job aborted: {e}")))
                }
            };
            if tx.send(event).is_err() {
                tracing::debug!("Background result dropped, app is shutting down");
            }
        });
    }

    fn load_subscribe_page(&self) {
        self.spawn(
            |site| async move {
                BackgroundEvent::SubscribePageLoaded(site.fetch_subscribe_page().await)
            },
            |e| BackgroundEvent::SubscribePageLoaded(Err(e)),
        );
    }

    fn load_categories(&self) {
        self.spawn(
            |site| async move { BackgroundEvent::CategoriesLoaded(site.list_categories().await) },
            |e| BackgroundEvent::CategoriesLoaded(Err(e)),
        );
    }

    fn load_article(&mut self) {
        let Some(reference) = self.article.clone() else {
            return;
        };
        self.state.article_status = ArticleStatus::Loading;
        self.spawn(
            move |site| async move {
                BackgroundEvent::ArticleLoaded(site.fetch_article(&reference).await)
            },
            |e| BackgroundEvent::ArticleLoaded(Err(e)),
        );
    }

    fn submit(&mut self) {
        let Some(request) = self.subscription.begin_submit() else {
            return;
        };
        tracing::info!(categories = request.category_ids.len(), "Submitting subscription");
        self.spawn(
            move |site| async move { BackgroundEvent::Submitted(site.subscribe(&request).await) },
            |e| BackgroundEvent::Submitted(Err(e)),
        );
    }

    fn check_email(&mut self) {
        let Some(email) = self.subscription.take_email_check() else {
            return;
        };
        let checked = email.clone();
        self.spawn(
            move |site| async move {
                let result = site.check_email(&email).await;
                BackgroundEvent::EmailChecked { email, result }
            },
            move |e| BackgroundEvent::EmailChecked {
                email: checked,
                result: Err(e),
            },
        );
    }

    /// Handle a key press
    pub fn handle_key(&mut self, key: KeyEvent, now: Instant) {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

        // Global quit
        if ctrl && key.code == KeyCode::Char('c') {
            self.quit = true;
            return;
        }

        if let KeyCode::F(n) = key.code {
            if let Some(view) = View::from_function_key(n) {
                self.state.show_view(view);
            }
            return;
        }

        match self.state.current_view {
            View::Subscribe => self.handle_subscribe_key(key),
            View::Article => self.handle_article_key(key, now),
        }
    }

    fn handle_subscribe_key(&mut self, key: KeyEvent) {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        let focus = self.subscription.form().focus;

        match key.code {
            KeyCode::Char('s') if ctrl => self.submit(),
            KeyCode::Char(' ') if ctrl => {
                self.subscription.accept_suggestion();
            }
            KeyCode::Esc => {
                self.subscription.dismiss();
            }
            KeyCode::Tab | KeyCode::Down => self.subscription.focus_next(),
            KeyCode::BackTab | KeyCode::Up => self.subscription.focus_prev(),
            KeyCode::Right if focus == Focus::Email => {
                self.subscription.accept_suggestion();
            }
            KeyCode::Enter => match focus {
                Focus::Submit => self.submit(),
                Focus::Category(_) => {
                    self.subscription.toggle_category();
                }
                Focus::Name | Focus::Email => self.subscription.focus_next(),
            },
            KeyCode::Char(' ') if matches!(focus, Focus::Category(_)) => {
                self.subscription.toggle_category();
            }
            KeyCode::Backspace => {
                self.subscription.backspace();
            }
            KeyCode::Char(c) if !ctrl => {
                self.subscription.input_char(c);
            }
            _ => {}
        }

        self.check_email();
        self.update_form_scroll();
    }

    fn handle_article_key(&mut self, key: KeyEvent, now: Instant) {
        if key.modifiers.contains(KeyModifiers::CONTROL) {
            return;
        }
        match key.code {
            KeyCode::Left | KeyCode::BackTab => self.share.select_prev(),
            KeyCode::Right | KeyCode::Tab => self.share.select_next(),
            KeyCode::Enter => self.share.activate_selected(now),
            KeyCode::Char('y') => {
                self.share.copy_page_link(now);
            }
            KeyCode::Char('r') if !self.state.article_is_loading() => self.load_article(),
            KeyCode::Char(c) => {
                if let Some(platform) = SharePlatform::from_shortcut(c) {
                    self.share.dispatch(platform.tag(), now);
                }
            }
            _ => {}
        }
    }

    fn update_form_scroll(&mut self) {
        if self.subscription.take_scroll_request() {
            // Feedback sits above the form
            self.state.form_scroll = 0;
        } else {
            self.state.form_scroll = scroll_for_focus(
                &self.subscription,
                self.state.form_scroll,
                self.state.terminal_size,
            );
        }
    }

    /// Apply every finished background job
    pub fn drain_background(&mut self, now: Instant) {
        while let Ok(event) = self.events_rx.try_recv() {
            self.apply(event, now);
        }
    }

    fn apply(&mut self, event: BackgroundEvent, now: Instant) {
        match event {
            BackgroundEvent::Submitted(result) => {
                if self.subscription.finish_submit(result, now) == FollowUp::ReloadPage {
                    self.load_subscribe_page();
                }
                self.update_form_scroll();
            }
            BackgroundEvent::SubscribePageLoaded(Ok(page)) => {
                self.subscription.set_subscriber_count(page.subscriber_count);
            }
            BackgroundEvent::SubscribePageLoaded(Err(e)) => {
                tracing::warn!("Failed to load subscribe page: {e}");
                self.state.status_message = Some("Contador de inscritos indisponível".into());
            }
            BackgroundEvent::CategoriesLoaded(Ok(categories)) => {
                tracing::debug!(count = categories.len(), "Categories loaded");
                self.subscription.set_categories(&categories);
            }
            BackgroundEvent::CategoriesLoaded(Err(e)) => {
                tracing::warn!("Failed to load categories: {e}");
                self.state.status_message = Some("Categorias indisponíveis".into());
            }
            BackgroundEvent::EmailChecked { email, result } => match result {
                Ok(taken) => self.subscription.apply_email_check(&email, taken),
                Err(e) => tracing::warn!("Email check failed: {e}"),
            },
            BackgroundEvent::ArticleLoaded(Ok(document)) => {
                let page = SharePage::from_document(&document);
                tracing::info!(title = %page.title, "Article loaded");
                self.share.set_page(page);
                self.state.article_status = ArticleStatus::Loaded;
            }
            BackgroundEvent::ArticleLoaded(Err(e)) => {
                tracing::warn!("Failed to load article: {e}");
                self.state.article_status = ArticleStatus::Failed(e.to_string());
            }
        }
    }

    /// Advance timers and animations. Returns true while frames are needed.
    pub fn tick(&mut self, now: Instant) -> bool {
        let form = self.subscription.tick(now);
        let notice = self.share.tick(now);
        form || notice || self.subscription.is_loading() || self.state.article_is_loading()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::share::{
        MockClipboardBackend, MockWindowOpener, ShareEnvironment, COPY_SUCCESS,
    };
    use crate::site::{MockSiteApi, SubscriptionRequest};
    use crate::subscription::{FAILURE_MESSAGE, SUCCESS_MESSAGE};
    use crossterm::event::{KeyEventKind, KeyEventState};
    use std::time::Duration;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent {
            code,
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Press,
            state: KeyEventState::NONE,
        }
    }

    fn ctrl(c: char) -> KeyEvent {
        KeyEvent {
            modifiers: KeyModifiers::CONTROL,
            ..key(KeyCode::Char(c))
        }
    }

    fn share_controller(clipboard: MockClipboardBackend) -> ShareController {
        let mut opener = MockWindowOpener::new();
        opener.expect_open().returning(|_, _, _| Ok(()));
        let mut fallback = MockClipboardBackend::new();
        fallback.expect_name().return_const("fallback");
        fallback.expect_write_text().never();
        ShareController::new(
            ShareEnvironment {
                opener: Box::new(opener),
                clipboard: Box::new(clipboard),
                fallback_clipboard: Box::new(fallback),
                use_primary_clipboard: true,
                analytics: None,
                screen: (1920, 1080),
            },
            SharePage::placeholder("http://localhost:8080/"),
        )
    }

    fn idle_clipboard() -> MockClipboardBackend {
        let mut clipboard = MockClipboardBackend::new();
        clipboard.expect_name().return_const("system");
        clipboard.expect_write_text().never();
        clipboard
    }

    fn site_with_page_data() -> MockSiteApi {
        let mut site = MockSiteApi::new();
        site.expect_fetch_subscribe_page().returning(|| {
            Ok(SubscribePage {
                subscriber_count: Some(1_234),
            })
        });
        site.expect_list_categories().returning(|| {
            Ok(vec![Category {
                id: 3,
                name: "Cloud".into(),
            }])
        });
        site
    }

    fn app(site: MockSiteApi, article: Option<&str>) -> App {
        App::new(
            Arc::new(site),
            share_controller(idle_clipboard()),
            article.map(str::to_string),
        )
    }

    /// Wait for `count` background events and apply them
    async fn settle(app: &mut App, count: usize, now: Instant) {
        for _ in 0..count {
            let event = tokio::time::timeout(Duration::from_secs(5), app.events_rx.recv())
                .await
                .expect("background event timed out")
                .expect("channel closed");
            app.apply(event, now);
        }
    }

    fn type_text(app: &mut App, text: &str) {
        let now = Instant::now();
        for c in text.chars() {
            app.handle_key(key(KeyCode::Char(c)), now);
        }
    }

    mod startup {
        use super::*;
        use pretty_assertions::assert_eq;

        #[tokio::test]
        async fn test_loads_counter_and_categories() {
            let mut app = app(site_with_page_data(), None);
            app.start();
            settle(&mut app, 2, Instant::now()).await;

            assert_eq!(app.subscription.counter().map(|c| c.value()), Some(1_234));
            assert_eq!(app.subscription.form().categories.len(), 1);
            assert_eq!(app.state.article_status, ArticleStatus::NotRequested);
        }

        #[tokio::test]
        async fn test_failed_loads_leave_form_usable() {
            let mut site = MockSiteApi::new();
            site.expect_fetch_subscribe_page()
                .returning(|| Err(SiteError::Decode("boom".into())));
            site.expect_list_categories()
                .returning(|| Err(SiteError::Decode("boom".into())));

            let mut app = app(site, None);
            app.start();
            settle(&mut app, 2, Instant::now()).await;

            assert!(app.subscription.counter().is_none());
            assert!(app.subscription.form().categories.is_empty());
            assert!(app.state.status_message.is_some());
        }

        #[tokio::test]
        async fn test_article_page_feeds_share_controller() {
            let mut site = site_with_page_data();
            site.expect_fetch_article()
                .withf(|reference| reference == "42")
                .times(1)
                .returning(|_| {
                    Ok(ArticleDocument {
                        url: "http://localhost:8080/articles/42".into(),
                        html: "<h1 class=\"article-title\">5G Networks Explained</h1>".into(),
                    })
                });

            let mut app = app(site, Some("42"));
            app.start();
            assert!(app.state.article_is_loading());
            settle(&mut app, 3, Instant::now()).await;

            assert_eq!(app.state.article_status, ArticleStatus::Loaded);
            assert_eq!(app.share.page().title, "5G Networks Explained");
            assert_eq!(app.share.page().article_id(), "42");
        }

        #[tokio::test]
        async fn test_article_failure_is_reported() {
            let mut site = site_with_page_data();
            site.expect_fetch_article()
                .returning(|_| Err(SiteError::Decode("not found".into())));

            let mut app = app(site, Some("999"));
            app.start();
            settle(&mut app, 3, Instant::now()).await;

            assert!(matches!(app.state.article_status, ArticleStatus::Failed(_)));
        }
    }

    mod subscribe {
        use super::*;
        use pretty_assertions::assert_eq;

        #[tokio::test]
        async fn test_submission_round_trip() {
            let mut site = site_with_page_data();
            site.expect_subscribe()
                .withf(|request: &SubscriptionRequest| {
                    request.name == "Ana" && request.email == "ana@site.com"
                })
                .times(1)
                .returning(|_| Ok(SubmissionOutcome::Subscribed));

            let now = Instant::now();
            let mut app = app(site, None);
            app.start();
            settle(&mut app, 2, now).await;

            type_text(&mut app, "Ana");
            app.handle_key(key(KeyCode::Tab), now);
            type_text(&mut app, "ana@site.com");
            app.handle_key(ctrl('s'), now);
            assert!(app.subscription.is_loading());
            assert!(app.tick(now));

            settle(&mut app, 1, now).await;

            assert!(!app.subscription.is_loading());
            assert_eq!(app.subscription.toast().unwrap().message, SUCCESS_MESSAGE);
            assert_eq!(app.subscription.form().full_name.value, "");
            assert_eq!(
                app.subscription
                    .counter()
                    .map(|c| c.displayed(now + Duration::from_secs(2))),
                Some(1_235)
            );
        }

        #[tokio::test]
        async fn test_unrecognized_response_reloads_page_data() {
            let mut site = MockSiteApi::new();
            site.expect_subscribe()
                .times(1)
                .returning(|_| Ok(SubmissionOutcome::Unrecognized));
            site.expect_fetch_subscribe_page().times(1).returning(|| {
                Ok(SubscribePage {
                    subscriber_count: Some(10),
                })
            });

            let now = Instant::now();
            let mut app = app(site, None);
            type_text(&mut app, "Ana");
            app.handle_key(key(KeyCode::Tab), now);
            type_text(&mut app, "ana@site.com");
            app.handle_key(ctrl('s'), now);

            // Submission result, then the reloaded page
            settle(&mut app, 2, now).await;

            assert!(!app.subscription.is_loading());
            assert!(app.subscription.toast().is_none());
            assert_eq!(app.subscription.counter().map(|c| c.value()), Some(10));
        }

        /// Site whose form post dies mid-request
        struct CrashingSite;

        #[async_trait::async_trait]
        impl SiteApi for CrashingSite {
            async fn subscribe(
                &self,
                _request: &SubscriptionRequest,
            ) -> Result<SubmissionOutcome, SiteError> {
                panic!("connection pool poisoned")
            }

            async fn fetch_subscribe_page(&self) -> Result<SubscribePage, SiteError> {
                Ok(SubscribePage::default())
            }

            async fn list_categories(&self) -> Result<Vec<Category>, SiteError> {
                Ok(Vec::new())
            }

            async fn check_email(&self, _email: &str) -> Result<bool, SiteError> {
                Ok(false)
            }

            async fn fetch_article(&self, _reference: &str) -> Result<ArticleDocument, SiteError> {
                Err(SiteError::Decode("no articles".into()))
            }
        }

        #[tokio::test]
        async fn test_crashed_submission_clears_loading() {
            let now = Instant::now();
            let mut app = App::new(
                Arc::new(CrashingSite),
                share_controller(idle_clipboard()),
                None,
            );
            type_text(&mut app, "Ana");
            app.handle_key(key(KeyCode::Tab), now);
            type_text(&mut app, "ana@site.com");
            app.handle_key(ctrl('s'), now);
            assert!(app.subscription.is_loading());

            settle(&mut app, 1, now).await;

            assert!(!app.subscription.is_loading());
            assert_eq!(app.subscription.toast().unwrap().message, FAILURE_MESSAGE);
        }

        #[test]
        fn test_invalid_submit_stays_local() {
            let mut app = app(MockSiteApi::new(), None);
            app.state.form_scroll = 7;
            app.handle_key(ctrl('s'), Instant::now());

            assert_eq!(app.subscription.validation_errors().map(<[String]>::len), Some(2));
            assert_eq!(app.state.form_scroll, 0);

            app.handle_key(key(KeyCode::Esc), Instant::now());
            assert_eq!(app.subscription.validation_errors(), None);
        }

        #[test]
        fn test_suggestion_accepted_with_right_arrow() {
            let mut app = app(MockSiteApi::new(), None);
            app.handle_key(key(KeyCode::Tab), Instant::now());
            type_text(&mut app, "jane@gma");
            app.handle_key(key(KeyCode::Right), Instant::now());
            assert_eq!(app.subscription.form().email.value, "jane@gmail.com");
        }

        #[test]
        fn test_space_types_in_fields_and_toggles_checkboxes() {
            let mut app = app(MockSiteApi::new(), None);
            app.subscription.set_categories(&[Category {
                id: 1,
                name: "IA".into(),
            }]);
            type_text(&mut app, "Ana Souza");
            assert_eq!(app.subscription.form().full_name.value, "Ana Souza");

            app.subscription.move_focus(Focus::Category(0));
            app.handle_key(key(KeyCode::Char(' ')), Instant::now());
            assert_eq!(app.subscription.form().selected_category_ids(), vec!["1"]);
        }
    }

    mod navigation {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_function_keys_switch_views() {
            let mut app = app(MockSiteApi::new(), None);
            app.handle_key(key(KeyCode::F(2)), Instant::now());
            assert_eq!(app.state.current_view, View::Article);
            app.handle_key(key(KeyCode::F(1)), Instant::now());
            assert_eq!(app.state.current_view, View::Subscribe);
        }

        #[test]
        fn test_ctrl_c_quits() {
            let mut app = app(MockSiteApi::new(), None);
            app.handle_key(ctrl('c'), Instant::now());
            assert!(app.should_quit());
        }

        #[test]
        fn test_article_shortcuts_share_and_copy() {
            let mut clipboard = MockClipboardBackend::new();
            clipboard.expect_name().return_const("system");
            clipboard
                .expect_write_text()
                .withf(|text| text == "http://localhost:8080/")
                .times(2)
                .returning(|_| Ok(()));

            let mut app = App::new(Arc::new(MockSiteApi::new()), share_controller(clipboard), None);
            app.state.show_view(View::Article);
            let now = Instant::now();

            app.handle_key(key(KeyCode::Char('t')), now);
            assert!(app.share.notice().is_none());

            app.handle_key(key(KeyCode::Char('c')), now);
            assert_eq!(app.share.notice().unwrap().message, COPY_SUCCESS);

            app.handle_key(key(KeyCode::Char('y')), now);
            assert!(app.tick(now));
        }
    }
}
