//! Form components - inputs with inline errors, alerts, auth forms

use medialist_core::registration::{AlertSeverity, FormField};
use medialist_core::{Alert, RegistrationFlow};

use super::escape_html;
use super::layout::button;

/// Renders a labelled input with its inline validation message.
pub fn field(
    label: &str,
    name: &str,
    input_type: &str,
    value: &str,
    error: Option<&str>,
) -> String {
    let border = if error.is_some() {
        "border-red-500"
    } else {
        "border-gray-600"
    };
    let error_html = error
        .map(|e| {
            format!(
                r#"<p class="mt-1 text-sm text-red-400" data-error-for="{name}">{}</p>"#,
                escape_html(e)
            )
        })
        .unwrap_or_default();

    format!(
        r#"<div>
            <label for="{name}" class="block text-sm font-medium text-gray-300 mb-1">{label}</label>
            <input id="{name}" type="{input_type}" name="{name}" value="{value}"
                   class="w-full px-4 py-2 bg-gray-700 border {border} rounded-lg text-white placeholder-gray-400 focus:outline-none focus:ring-2 focus:ring-sky-500 focus:border-transparent" />
            {error_html}
        </div>"#,
        value = escape_html(value),
    )
}

/// Renders a dismissible alert banner.
pub fn alert_banner(alert: &Alert) -> String {
    let classes = match alert.severity {
        AlertSeverity::Error => "bg-red-900 border-red-700 text-red-100",
        AlertSeverity::Info => "bg-sky-900 border-sky-700 text-sky-100",
    };

    format!(
        r#"<div role="alert" class="flex items-start justify-between border rounded-lg px-4 py-3 {classes}">
            <span>{}</span>
            <button type="button" aria-label="Dismiss" class="ml-4" onclick="this.parentElement.remove()">&times;</button>
        </div>"#,
        escape_html(&alert.message)
    )
}

/// Spinner shown while a submission is in flight.
pub fn loading_indicator(id: &str) -> String {
    format!(
        r#"<div id="{id}" class="htmx-indicator flex justify-center py-6">
            <div class="w-8 h-8 border-4 border-sky-500 border-t-transparent rounded-full animate-spin"></div>
        </div>"#
    )
}

/// Renders the registration form for the current flow state.
///
/// While a submission is pending the form is hidden and only the loading
/// indicator shows. htmx marks the panel with `htmx-request` for the length
/// of the request. Passwords are never echoed back.
pub fn register_form(flow: &RegistrationFlow) -> String {
    let panel_class = if flow.is_loading() { "htmx-request" } else { "" };
    let values = flow.values();
    let errors = flow.errors();
    let alert = flow.alert().map(alert_banner).unwrap_or_default();

    format!(
        r##"<div id="register-panel" class="{panel_class}">
            <form method="post" action="/auth/register" class="space-y-4 hide-while-loading"
                    hx-boost="true" hx-indicator="#register-panel">
                {email}
                {password}
                {confirm}
                {alert}
                {submit}
            </form>
            {loading}
        </div>
        <p class="mt-6 text-sm text-gray-400">Already have an account?
            <a href="/auth/login" class="text-sky-400 hover:underline">Sign in</a></p>"##,
        email = field(
            "Email",
            FormField::Email.name(),
            "email",
            &values.email,
            errors.get(FormField::Email)
        ),
        password = field(
            "Password",
            FormField::Password.name(),
            "password",
            "",
            errors.get(FormField::Password)
        ),
        confirm = field(
            "Confirm password",
            FormField::ConfirmPassword.name(),
            "password",
            "",
            errors.get(FormField::ConfirmPassword)
        ),
        submit = button("Register", "primary", Some(r#"type="submit""#)),
        loading = loading_indicator("register-loading"),
    )
}

/// Renders the sign-in form.
pub fn login_form(email: &str, alert: Option<&Alert>, next: Option<&str>) -> String {
    let alert = alert.map(alert_banner).unwrap_or_default();
    let next_input = next
        .map(|n| format!(r#"<input type="hidden" name="next" value="{}" />"#, escape_html(n)))
        .unwrap_or_default();

    format!(
        r#"<form method="post" action="/auth/login" class="space-y-4">
            {next_input}
            {email}
            {password}
            {alert}
            {submit}
        </form>
        <p class="mt-6 text-sm text-gray-400">No account yet?
            <a href="/auth/register" class="text-sky-400 hover:underline">Register</a></p>"#,
        email = field("Email", "email", "email", email, None),
        password = field("Password", "password", "password", "", None),
        submit = button("Sign in", "primary", Some(r#"type="submit""#)),
    )
}
