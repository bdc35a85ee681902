//! Application state and core logic

use crate::config::SignupConfig;
use crate::sink::SubmissionSink;
use crate::state::{pointer_ratio, FormFocus, RegisterForm};
use crate::ui::FormLayout;
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use ratatui::layout::{Position, Rect};

/// Main application struct
pub struct App {
    /// Registration form state
    pub form: RegisterForm,
    /// Where validated registrations go
    sink: Box<dyn SubmissionSink>,
    /// Whether the app should quit
    quit: bool,
    /// Feedback shown in the status bar
    pub status_message: Option<String>,
    /// Submission failure shown as a dialog
    pub error: Option<String>,
    /// Terminal size for hit testing (height, width)
    pub terminal_size: Option<(u16, u16)>,
    /// Whether the pointer was over the Register button on the last move
    pointer_over_button: bool,
}

impl App {
    /// Create a new App instance
    pub fn new(form: RegisterForm, sink: Box<dyn SubmissionSink>) -> Self {
        Self {
            form,
            sink,
            quit: false,
            status_message: None,
            error: None,
            terminal_size: None,
            pointer_over_button: false,
        }
    }

    pub fn from_config(config: &SignupConfig) -> Self {
        let mut form = RegisterForm::new(config.validation_policy());
        let reveal = config.show_passwords.unwrap_or(false);
        form.set_password_visibility(reveal, reveal);
        Self::new(form, Box::new(config.sink()))
    }

    /// Check if app should quit
    pub fn should_quit(&self) -> bool {
        self.quit
    }

    fn layout(&self) -> Option<FormLayout> {
        self.terminal_size
            .map(|(height, width)| FormLayout::new(Rect::new(0, 0, width, height)))
    }

    /// Handle a key press
    pub async fn handle_key(&mut self, key: KeyEvent) -> Result<()> {
        // The error dialog swallows keys until dismissed
        if self.error.is_some() {
            if matches!(key.code, KeyCode::Enter | KeyCode::Esc) {
                self.error = None;
            }
            return Ok(());
        }

        let focus = self.form.focus();
        match key.code {
            KeyCode::Esc => self.quit = true,
            KeyCode::Char('s')
                if key.modifiers.contains(KeyModifiers::CONTROL)
                    || key.modifiers.contains(crate::platform::SUBMIT_MODIFIER) =>
            {
                self.submit().await;
            }
            KeyCode::Char('u') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                if let Some(field) = focus.field() {
                    self.form.clear_field(field);
                }
            }
            KeyCode::F(2) => self.form.toggle_password_visibility(),
            KeyCode::F(3) => self.form.toggle_confirm_password_visibility(),
            KeyCode::Tab | KeyCode::Down => self.form.next_focus(),
            KeyCode::BackTab | KeyCode::Up => self.form.prev_focus(),
            KeyCode::Enter => match focus {
                FormFocus::Field(_) => self.form.next_focus(),
                FormFocus::Agree => self.form.toggle_agree(),
                FormFocus::Register => self.submit().await,
            },
            KeyCode::Char(' ') if focus == FormFocus::Agree => self.form.toggle_agree(),
            KeyCode::Char(c)
                if !key
                    .modifiers
                    .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) =>
            {
                self.status_message = None;
                self.form.input_char(c);
            }
            KeyCode::Backspace => {
                self.status_message = None;
                self.form.backspace();
            }
            _ => {}
        }
        Ok(())
    }

    /// Handle mouse movement and clicks
    pub async fn handle_mouse(&mut self, mouse: MouseEvent) -> Result<()> {
        let Some(layout) = self.layout() else {
            return Ok(());
        };
        let pos = Position::new(mouse.column, mouse.row);
        let button = layout.button(self.form.button_slot());

        match mouse.kind {
            MouseEventKind::Moved => {
                let inside = button.contains(pos);
                if inside && !self.pointer_over_button {
                    let ratio = pointer_ratio(mouse.column, button.x, button.width);
                    self.form.hover(ratio);
                    // The button may have moved out from under the pointer
                    self.pointer_over_button =
                        layout.button(self.form.button_slot()).contains(pos);
                } else {
                    self.pointer_over_button = inside;
                }
            }
            MouseEventKind::Down(MouseButton::Left) if self.error.is_none() => {
                if button.contains(pos) {
                    self.form.set_focus(FormFocus::Register);
                    self.submit().await;
                } else if let Some(field) = layout.field_at(mouse.column, mouse.row) {
                    self.form.set_focus(FormFocus::Field(field));
                } else if layout.agree_contains(mouse.column, mouse.row) {
                    self.form.set_focus(FormFocus::Agree);
                    self.form.toggle_agree();
                }
            }
            _ => {}
        }
        Ok(())
    }

    /// Hand the form to the sink if it is valid. Invalid forms are ignored silently.
    async fn submit(&mut self) {
        let Some(values) = self.form.submit() else {
            return;
        };

        match self.sink.submit(values).await {
            Ok(receipt) => {
                tracing::info!(
                    id = %receipt.id,
                    accepted_at = %receipt.accepted_at,
                    "registration complete"
                );
                self.status_message = Some(format!(
                    "Welcome, {}! Your account is ready.",
                    receipt.user_name
                ));
                self.form.reset();
                self.pointer_over_button = false;
            }
            Err(err) => {
                tracing::warn!(error = %err, "registration failed");
                self.error = Some(err.to_string());
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sink::{MockSubmissionSink, SinkError, SubmissionReceipt};
    use crate::state::{ButtonSlot, FieldName, FormValues};
    use chrono::Utc;
    use uuid::Uuid;

    const HEIGHT: u16 = 40;
    const WIDTH: u16 = 100;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn ctrl(c: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL)
    }

    fn click(column: u16, row: u16) -> MouseEvent {
        mouse(MouseEventKind::Down(MouseButton::Left), column, row)
    }

    fn mouse(kind: MouseEventKind, column: u16, row: u16) -> MouseEvent {
        MouseEvent {
            kind,
            column,
            row,
            modifiers: KeyModifiers::NONE,
        }
    }

    fn accepting_sink(times: usize) -> MockSubmissionSink {
        let mut sink = MockSubmissionSink::new();
        sink.expect_submit().times(times).returning(|values| {
            Ok(SubmissionReceipt {
                id: Uuid::new_v4(),
                user_name: values.user_name,
                accepted_at: Utc::now(),
            })
        });
        sink
    }

    fn app_with(sink: MockSubmissionSink) -> App {
        let mut app = App::new(RegisterForm::default(), Box::new(sink));
        app.terminal_size = Some((HEIGHT, WIDTH));
        app
    }

    async fn type_text(app: &mut App, text: &str) {
        for c in text.chars() {
            app.handle_key(key(KeyCode::Char(c))).await.unwrap();
        }
    }

    /// Fill every field through the keyboard, leaving focus on the checkbox
    async fn fill_valid(app: &mut App) {
        type_text(app, "nikki01").await;
        app.handle_key(key(KeyCode::Tab)).await.unwrap();
        type_text(app, "nikki@codetikki.dev").await;
        app.handle_key(key(KeyCode::Tab)).await.unwrap();
        type_text(app, "secret1").await;
        app.handle_key(key(KeyCode::Tab)).await.unwrap();
        type_text(app, "secret1").await;
        app.handle_key(key(KeyCode::Tab)).await.unwrap();
    }

    fn layout() -> FormLayout {
        FormLayout::new(Rect::new(0, 0, WIDTH, HEIGHT))
    }

    mod keyboard {
        use super::*;
        use pretty_assertions::assert_eq;

        #[tokio::test]
        async fn test_typing_fills_focused_field() {
            let mut app = app_with(accepting_sink(0));
            type_text(&mut app, "Nikki").await;
            assert_eq!(app.form.values().user_name, "Nikki");
            app.handle_key(key(KeyCode::Backspace)).await.unwrap();
            assert_eq!(app.form.values().user_name, "Nikk");
        }

        #[tokio::test]
        async fn test_enter_on_field_moves_focus() {
            let mut app = app_with(accepting_sink(0));
            app.handle_key(key(KeyCode::Enter)).await.unwrap();
            assert_eq!(app.form.focus(), FormFocus::Field(FieldName::Email));
        }

        #[tokio::test]
        async fn test_space_toggles_agree() {
            let mut app = app_with(accepting_sink(0));
            app.form.set_focus(FormFocus::Agree);
            app.handle_key(key(KeyCode::Char(' '))).await.unwrap();
            assert!(app.form.values().is_agree);
            app.handle_key(key(KeyCode::Enter)).await.unwrap();
            assert!(!app.form.values().is_agree);
        }

        #[tokio::test]
        async fn test_function_keys_toggle_visibility() {
            let mut app = app_with(accepting_sink(0));
            app.handle_key(key(KeyCode::F(2))).await.unwrap();
            let snapshot = app.form.snapshot();
            assert!(snapshot.show_password);
            assert!(!snapshot.show_confirm_password);
            app.handle_key(key(KeyCode::F(3))).await.unwrap();
            assert!(app.form.snapshot().show_confirm_password);
        }

        #[tokio::test]
        async fn test_ctrl_chars_are_not_typed() {
            let mut app = app_with(accepting_sink(0));
            app.handle_key(ctrl('x')).await.unwrap();
            assert_eq!(app.form.values(), &FormValues::default());
        }

        #[tokio::test]
        async fn test_ctrl_u_clears_focused_field() {
            let mut app = app_with(accepting_sink(0));
            type_text(&mut app, "Nikki").await;
            app.handle_key(ctrl('u')).await.unwrap();
            assert_eq!(app.form.values().user_name, "");
        }

        #[tokio::test]
        async fn test_esc_quits() {
            let mut app = app_with(accepting_sink(0));
            assert!(!app.should_quit());
            app.handle_key(key(KeyCode::Esc)).await.unwrap();
            assert!(app.should_quit());
        }
    }

    mod submission {
        use super::*;
        use pretty_assertions::assert_eq;

        #[tokio::test]
        async fn test_invalid_submit_never_reaches_sink() {
            let mut app = app_with(accepting_sink(0));
            app.form.set_focus(FormFocus::Register);
            app.handle_key(key(KeyCode::Enter)).await.unwrap();
            app.handle_key(ctrl('s')).await.unwrap();
            assert!(app.status_message.is_none());
            assert!(app.error.is_none());
        }

        #[tokio::test]
        async fn test_valid_submit_forwards_once() {
            let mut sink = MockSubmissionSink::new();
            sink.expect_submit()
                .withf(|values: &FormValues| {
                    values.user_name == "nikki01" && values.confirm_password == "secret1"
                })
                .times(1)
                .returning(|values| {
                    Ok(SubmissionReceipt {
                        id: Uuid::nil(),
                        user_name: values.user_name,
                        accepted_at: Utc::now(),
                    })
                });
            let mut app = app_with(sink);
            fill_valid(&mut app).await;

            app.handle_key(key(KeyCode::Tab)).await.unwrap();
            assert_eq!(app.form.focus(), FormFocus::Register);
            app.handle_key(key(KeyCode::Enter)).await.unwrap();

            assert_eq!(
                app.status_message.as_deref(),
                Some("Welcome, nikki01! Your account is ready.")
            );
            assert_eq!(app.form.values(), &FormValues::default());
        }

        #[tokio::test]
        async fn test_each_click_submits_once() {
            let mut app = app_with(accepting_sink(2));
            let layout = layout();

            fill_valid(&mut app).await;
            let button = layout.button(app.form.button_slot());
            app.handle_mouse(click(button.x + 1, button.y + 1)).await.unwrap();

            fill_valid(&mut app).await;
            let button = layout.button(app.form.button_slot());
            app.handle_mouse(click(button.x + 1, button.y + 1)).await.unwrap();
        }

        #[tokio::test]
        async fn test_sink_failure_shows_dialog_and_keeps_values() {
            let mut sink = MockSubmissionSink::new();
            sink.expect_submit()
                .times(1)
                .returning(|_| Err(SinkError::Unavailable));
            let mut app = app_with(sink);
            fill_valid(&mut app).await;
            app.handle_key(ctrl('s')).await.unwrap();

            assert_eq!(
                app.error.as_deref(),
                Some("Registration service unavailable")
            );
            assert_eq!(app.form.values().user_name, "nikki01");

            // Keys are swallowed until the dialog is dismissed
            app.handle_key(key(KeyCode::Char('x'))).await.unwrap();
            assert_eq!(app.form.values().user_name, "nikki01");
            app.handle_key(key(KeyCode::Esc)).await.unwrap();
            assert!(app.error.is_none());
            assert!(!app.should_quit());
        }
    }

    mod pointer {
        use super::*;
        use pretty_assertions::assert_eq;

        fn moved(column: u16, row: u16) -> MouseEvent {
            mouse(MouseEventKind::Moved, column, row)
        }

        #[tokio::test]
        async fn test_entering_left_half_sends_button_to_end() {
            let mut app = app_with(accepting_sink(0));
            let button = layout().button(ButtonSlot::Middle);
            app.handle_mouse(moved(button.x + 1, button.y + 1)).await.unwrap();
            assert_eq!(app.form.button_slot(), ButtonSlot::End);
        }

        #[tokio::test]
        async fn test_entering_right_half_sends_button_to_start() {
            let mut app = app_with(accepting_sink(0));
            let button = layout().button(ButtonSlot::Middle);
            app.handle_mouse(moved(button.right() - 1, button.y + 1)).await.unwrap();
            assert_eq!(app.form.button_slot(), ButtonSlot::Start);
        }

        #[tokio::test]
        async fn test_moving_outside_does_nothing() {
            let mut app = app_with(accepting_sink(0));
            app.handle_mouse(moved(0, 0)).await.unwrap();
            assert_eq!(app.form.button_slot(), ButtonSlot::Middle);
        }

        #[tokio::test]
        async fn test_chasing_the_button_oscillates() {
            let mut app = app_with(accepting_sink(0));
            let layout = layout();

            let middle = layout.button(ButtonSlot::Middle);
            app.handle_mouse(moved(middle.x, middle.y + 1)).await.unwrap();
            assert_eq!(app.form.button_slot(), ButtonSlot::End);

            let end = layout.button(ButtonSlot::End);
            app.handle_mouse(moved(end.right() - 1, end.y + 1)).await.unwrap();
            assert_eq!(app.form.button_slot(), ButtonSlot::Middle);
        }

        #[tokio::test]
        async fn test_valid_form_keeps_button_still() {
            let mut app = app_with(accepting_sink(0));
            fill_valid(&mut app).await;
            let button = layout().button(ButtonSlot::Middle);
            app.handle_mouse(moved(button.x, button.y + 1)).await.unwrap();
            app.handle_mouse(moved(0, 0)).await.unwrap();
            app.handle_mouse(moved(button.right() - 1, button.y + 1)).await.unwrap();
            assert_eq!(app.form.button_slot(), ButtonSlot::Middle);
        }

        #[tokio::test]
        async fn test_click_on_invalid_button_is_noop() {
            let mut app = app_with(accepting_sink(0));
            let button = layout().button(ButtonSlot::Middle);
            app.handle_mouse(click(button.x, button.y)).await.unwrap();
            assert_eq!(app.form.focus(), FormFocus::Register);
            assert!(app.status_message.is_none());
        }

        #[tokio::test]
        async fn test_click_focuses_field_and_toggles_agree() {
            let mut app = app_with(accepting_sink(0));
            let layout = layout();

            let email = layout.field(FieldName::Email);
            app.handle_mouse(click(email.x + 2, email.y + 1)).await.unwrap();
            assert_eq!(app.form.focus(), FormFocus::Field(FieldName::Email));

            app.handle_mouse(click(layout.agree.x, layout.agree.y)).await.unwrap();
            assert_eq!(app.form.focus(), FormFocus::Agree);
            assert!(app.form.values().is_agree);
        }

        #[tokio::test]
        async fn test_without_terminal_size_mouse_is_ignored() {
            let mut app = app_with(accepting_sink(0));
            app.terminal_size = None;
            app.handle_mouse(moved(50, 30)).await.unwrap();
            assert_eq!(app.form.button_slot(), ButtonSlot::Middle);
        }
    }

    #[test]
    fn test_from_config_applies_settings() {
        let config = SignupConfig {
            require_terms_agreement: Some(true),
            show_passwords: Some(true),
            ..Default::default()
        };
        let app = App::from_config(&config);
        let snapshot = app.form.snapshot();
        assert!(snapshot.show_password);
        assert!(snapshot.show_confirm_password);
        assert!(app.form.policy().require_terms_agreement);
    }
}
