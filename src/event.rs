use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::app::{self, Mode};
use crate::widget::DatePickerState;

fn handle_keys_edit_amount(keycode: KeyCode, app: &mut app::App) {
    match keycode {
        KeyCode::Enter => {
            app.submit();
        }
        KeyCode::Char(c) => {
            app.amount.add_char(c);
        }
        KeyCode::Backspace => {
            app.amount.del_char();
        }
        KeyCode::Delete => {
            app.amount.reset();
        }
        KeyCode::Esc => {
            app.mode = Mode::DisplayChart;
        }
        KeyCode::Tab => {
            app.mode = app.mode.next_focus();
        }
        KeyCode::BackTab => {
            app.mode = app.mode.previous_focus();
        }
        _ => {}
    }
}

fn handle_keys_edit_date(keycode: KeyCode, app: &mut app::App) {
    match keycode {
        KeyCode::Enter => {
            app.submit();
        }
        KeyCode::Left => app.change_purchase_date(DatePickerState::previous_day),
        KeyCode::Right => app.change_purchase_date(DatePickerState::next_day),
        KeyCode::Down => app.change_purchase_date(DatePickerState::previous_month),
        KeyCode::Up => app.change_purchase_date(DatePickerState::next_month),
        KeyCode::PageDown => app.change_purchase_date(DatePickerState::previous_year),
        KeyCode::PageUp => app.change_purchase_date(DatePickerState::next_year),
        KeyCode::Esc => {
            app.mode = Mode::DisplayChart;
        }
        KeyCode::Tab => {
            app.mode = app.mode.next_focus();
        }
        KeyCode::BackTab => {
            app.mode = app.mode.previous_focus();
        }
        _ => {}
    }
}

fn handle_keys_display_chart(keycode: KeyCode, app: &mut app::App) {
    match keycode {
        KeyCode::Enter => {
            app.submit();
        }
        KeyCode::Char('a') => {
            app.mode = Mode::EditAmount;
        }
        KeyCode::Char('d') => {
            app.mode = Mode::EditDate;
        }
        KeyCode::Tab => {
            app.mode = app.mode.next_focus();
        }
        KeyCode::BackTab => {
            app.mode = app.mode.previous_focus();
        }
        _ => {}
    }
}

/// Returns `true` when the app should quit
pub fn handle_key_bindings(key_event: KeyEvent, app: &mut app::App) -> bool {
    match (app.mode, key_event.modifiers, key_event.code) {
        (_, KeyModifiers::CONTROL, KeyCode::Char('c')) => {
            return true;
        }
        (Mode::Help, modifiers, keycode) => {
            if (modifiers.is_empty() || modifiers == KeyModifiers::SHIFT)
                && (matches!(
                    keycode,
                    KeyCode::Esc | KeyCode::Char('?') | KeyCode::Char('q')
                ))
            {
                app.mode = app.previous_mode;
            }
        }
        (mode, KeyModifiers::NONE, KeyCode::Char('?'))
        | (mode, KeyModifiers::SHIFT, KeyCode::Char('?')) => {
            app.previous_mode = mode;
            app.mode = Mode::Help;
        }
        (Mode::EditAmount, modifiers, keycode) => {
            if modifiers.is_empty() || modifiers == KeyModifiers::SHIFT {
                handle_keys_edit_amount(keycode, app)
            }
        }
        (_, KeyModifiers::NONE, KeyCode::Char('q')) => {
            return true;
        }
        (Mode::EditDate, modifiers, keycode) => {
            if modifiers.is_empty() || modifiers == KeyModifiers::SHIFT {
                handle_keys_edit_date(keycode, app)
            }
        }
        (Mode::DisplayChart, modifiers, keycode) => {
            if modifiers.is_empty() || modifiers == KeyModifiers::SHIFT {
                handle_keys_display_chart(keycode, app)
            }
        }
    }

    false
}
