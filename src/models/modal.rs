use crate::config::APP_NAME;

/// Which form the credential modal presents.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ModalMode {
    #[default]
    SignIn,
    SignUp,
}

impl ModalMode {
    pub fn toggled(self) -> Self {
        match self {
            ModalMode::SignIn => ModalMode::SignUp,
            ModalMode::SignUp => ModalMode::SignIn,
        }
    }

    /// Labels shown for this mode.
    pub fn copy(self) -> ModalCopy {
        match self {
            ModalMode::SignIn => ModalCopy {
                title: format!("Sign In to {APP_NAME}"),
                submit_label: "Sign In",
                switch_prompt: "Don't have an account?",
                switch_label: "Sign Up",
            },
            ModalMode::SignUp => ModalCopy {
                title: format!("Create Your {APP_NAME} Account"),
                submit_label: "Create Account",
                switch_prompt: "Already have an account?",
                switch_label: "Sign In",
            },
        }
    }
}

/// Mode-dependent text of the modal.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ModalCopy {
    pub title: String,
    pub submit_label: &'static str,
    pub switch_prompt: &'static str,
    pub switch_label: &'static str,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SubmitPhase {
    #[default]
    Idle,
    Submitting,
}

/// Feedback message shown below the form.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Notice {
    Error(String),
    Success(String),
}

impl Notice {
    pub fn text(&self) -> &str {
        match self {
            Notice::Error(text) | Notice::Success(text) => text,
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Notice::Error(_))
    }
}

/// Inline validity of a single form field.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum FieldValidity {
    #[default]
    Untouched,
    Valid,
    Invalid,
}

impl FieldValidity {
    /// Validity after the field loses focus.
    pub fn on_blur(value: &str) -> Self {
        if value.trim().is_empty() {
            FieldValidity::Invalid
        } else {
            FieldValidity::Valid
        }
    }

    /// Validity after the user types into the field.
    pub fn on_input(self) -> Self {
        match self {
            FieldValidity::Invalid => FieldValidity::Valid,
            other => other,
        }
    }
}

/// A form field with its typed value and inline validity.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FormField {
    pub value: String,
    pub validity: FieldValidity,
}

impl FormField {
    pub fn clear(&mut self) {
        *self = FormField::default();
    }
}

/// Complete render state of the credential modal.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ModalState {
    pub is_open: bool,
    pub mode: ModalMode,
    pub phase: SubmitPhase,
    pub notice: Option<Notice>,
    pub email: FormField,
    pub password: FormField,
}

impl ModalState {
    pub fn copy(&self) -> ModalCopy {
        self.mode.copy()
    }

    pub fn is_submitting(&self) -> bool {
        self.phase == SubmitPhase::Submitting
    }
}
