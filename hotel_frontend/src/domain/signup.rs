// Local signup rules mirrored from the backend serializer so bad input never leaves the client.

const SPECIAL_CHARACTERS: &str = "!@#$%^&*(),.?\":{}|<>";
const USERNAME_LENGTH: std::ops::RangeInclusive<usize> = 4..=8;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PasswordRule {
    MinLength,
    Uppercase,
    Lowercase,
    Digit,
    Special,
}

impl PasswordRule {
    pub fn message(&self) -> &'static str {
        match self {
            PasswordRule::MinLength => "Password must be at least 8 characters long.",
            PasswordRule::Uppercase => "Password must contain at least one uppercase letter.",
            PasswordRule::Lowercase => "Password must contain at least one lowercase letter.",
            PasswordRule::Digit => "Password must contain at least one digit.",
            PasswordRule::Special => "Password must contain at least one special character.",
        }
    }
}

// Returns exactly the violated rules, in a stable order. Empty means the password is acceptable.
pub fn validate_password(password: &str) -> Vec<PasswordRule> {
    let mut violations = Vec::new();
    if password.chars().count() < 8 {
        violations.push(PasswordRule::MinLength);
    }
    if !password.chars().any(|c| c.is_ascii_uppercase()) {
        violations.push(PasswordRule::Uppercase);
    }
    if !password.chars().any(|c| c.is_ascii_lowercase()) {
        violations.push(PasswordRule::Lowercase);
    }
    if !password.chars().any(|c| c.is_ascii_digit()) {
        violations.push(PasswordRule::Digit);
    }
    if !password.chars().any(|c| SPECIAL_CHARACTERS.contains(c)) {
        violations.push(PasswordRule::Special);
    }
    violations
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignupError {
    MissingFields,
    UsernameLength,
    WeakPassword,
    PasswordMismatch,
}

impl SignupError {
    pub fn message(&self) -> &'static str {
        match self {
            SignupError::MissingFields => "Please fill all required fields",
            SignupError::UsernameLength => "Username must be between 4 and 8 characters long",
            SignupError::WeakPassword => "Please fix password issues before submitting",
            SignupError::PasswordMismatch => "Passwords do not match",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SignupForm {
    pub username: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
}

impl SignupForm {
    pub fn validate(&self) -> Result<(), SignupError> {
        if self.username.is_empty() || self.email.is_empty() || self.password.is_empty() {
            return Err(SignupError::MissingFields);
        }
        if !USERNAME_LENGTH.contains(&self.username.chars().count()) {
            return Err(SignupError::UsernameLength);
        }
        if !validate_password(&self.password).is_empty() {
            return Err(SignupError::WeakPassword);
        }
        if self.password != self.confirm_password {
            return Err(SignupError::PasswordMismatch);
        }
        Ok(())
    }
}

/// Field-specific messages returned by the backend on a 400 response.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors {
    pub username: Vec<String>,
    pub email: Vec<String>,
    pub password: Vec<String>,
    pub non_field_errors: Vec<String>,
}

impl FieldErrors {
    pub fn is_empty(&self) -> bool {
        self.username.is_empty()
            && self.email.is_empty()
            && self.password.is_empty()
            && self.non_field_errors.is_empty()
    }

    pub fn summary(&self) -> String {
        let mut message = String::new();
        for (label, errors) in [
            ("Username", &self.username),
            ("Email", &self.email),
            ("Password", &self.password),
        ] {
            if !errors.is_empty() {
                message.push_str(&format!("{label}: {}\n", errors.join(" ")));
            }
        }
        message.push_str(&self.non_field_errors.join(" "));

        if message.is_empty() {
            "Validation failed. Please check your information.".to_string()
        } else {
            message
        }
    }
}
