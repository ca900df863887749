use anyhow::Result;
use derive_more::Display;
use inquire::{Confirm, Password, PasswordDisplayMode, Select, Text};
use strum::IntoEnumIterator;
use strum_macros::EnumIter;
use todo_settings::api::HttpApi;
use todo_settings::config::Config;
use todo_settings::models::{SettingsField, User};
use todo_settings::pages::settings::SettingsPage;
use todo_settings::types::Validation;
use todo_settings::utils::custom_validator::CustomValidator;

type MenuExit = Option<()>;
const MENU_EXIT: MenuExit = None;
const MENU_LOOP: MenuExit = Some(());

/// A text menu
trait Menu {
    /// Shows the menu once. Returns `None` to leave the menu,
    /// `Some(())` to show it again.
    fn enter(&mut self) -> Result<MenuExit>;

    /// Shows the menu until it asks to leave, reporting errors
    fn enter_loop(&mut self) {
        while let Some(result) = self.enter().transpose() {
            if let Err(error) = result {
                eprintln!("Error: {error}");
            }
        }
    }
}

/// Prompts until the input passes the given check
fn prompt_validated<F>(prompt: &str, check: F) -> Result<String>
where
    F: Fn(&str) -> Validation,
{
    loop {
        let input = Text::new(prompt).prompt()?;
        let validation = check(&input);
        if !validation.error {
            return Ok(input);
        }
        println!("{}", validation.text);
    }
}

fn prompt_password(prompt: &str) -> Result<String> {
    Ok(Password::new(prompt)
        .without_confirmation()
        .with_display_mode(PasswordDisplayMode::Masked)
        .prompt()?)
}

struct SettingsMenu {
    runtime: tokio::runtime::Runtime,
    page: SettingsPage<HttpApi>,
}

impl SettingsMenu {
    fn show_account(&self) {
        match self.page.user() {
            Some(user) => println!("Name: {}\nEmail: {}", user.name, user.email),
            None => println!("[!] No account loaded"),
        }
    }

    fn change_name(&mut self) -> Result<()> {
        self.page.open_change(SettingsField::Name);
        let name = prompt_validated("New name:", |input| CustomValidator::first_name(input).into())?;
        self.page.set_name(&name);
        self.runtime.block_on(self.page.submit_name())?;
        println!("Name updated");
        Ok(())
    }

    fn change_email(&mut self) -> Result<()> {
        self.page.open_change(SettingsField::Email);
        let email = prompt_validated("New email:", |input| CustomValidator::email(input).into())?;
        self.page.set_email(&email);
        let password = prompt_password("Confirm your password:")?;
        self.page.set_email_password(&password);
        self.runtime.block_on(self.page.submit_email())?;
        println!("Email updated");
        Ok(())
    }

    fn change_password(&mut self) -> Result<()> {
        self.page.open_change(SettingsField::Password);
        loop {
            let password = prompt_password("New password:")?;
            let feedback = self.page.set_password(&password);
            if feedback.error {
                println!("{}", feedback.text);
                continue;
            }
            let feedback = self.page.set_password_confirm(&prompt_password("Confirm new password:")?);
            if feedback.error {
                println!("{}", feedback.text);
                continue;
            }
            break;
        }
        self.page.set_current_password(&prompt_password("Current password:")?);
        self.runtime.block_on(self.page.submit_password())?;
        println!("Password updated");
        Ok(())
    }
}

impl Menu for SettingsMenu {
    fn enter(&mut self) -> Result<MenuExit> {
        #[derive(EnumIter, Display)]
        enum Choice {
            #[display("Show account details")]
            Show,
            #[display("Change name")]
            ChangeName,
            #[display("Change email")]
            ChangeEmail,
            #[display("Change password")]
            ChangePassword,
            #[display("Permanently delete account")]
            DeleteAccount,
            #[display("Quit")]
            Exit,
        }

        let choice = Select::new("Settings", Choice::iter().collect()).prompt()?;

        // A failed or abandoned change must not leave its form open
        let outcome = match choice {
            Choice::Show => {
                self.show_account();
                Ok(())
            }
            Choice::ChangeName => self.change_name().inspect_err(|_| {
                self.page.cancel_change(SettingsField::Name)
            }),
            Choice::ChangeEmail => self.change_email().inspect_err(|_| {
                self.page.cancel_change(SettingsField::Email)
            }),
            Choice::ChangePassword => self.change_password().inspect_err(|_| {
                self.page.cancel_change(SettingsField::Password)
            }),
            Choice::DeleteAccount => {
                if Confirm::new("Permanently delete your account?")
                    .with_help_message("This will immediately delete all of your data including todos, lists, and more. This can't be undone.")
                    .with_default(false)
                    .prompt()?
                {
                    self.runtime.block_on(self.page.delete_account())?;
                    println!("Account deleted");
                    return Ok(MENU_EXIT);
                }
                Ok(())
            }
            Choice::Exit => return Ok(MENU_EXIT),
        };

        outcome.map(|_| MENU_LOOP)
    }
}

fn main() -> Result<()> {
    let config = Config::from_env()?;
    simple_logging::log_to_file(&config.log_file, log::LevelFilter::Info)?;

    let name = Text::new("Your name:").prompt()?;
    let email = Text::new("Your email:").prompt()?;
    let user = User {
        name,
        email,
        password: None,
    };

    let runtime = tokio::runtime::Runtime::new()?;
    let page = SettingsPage::new(HttpApi::from_config(&config), Some(user));
    println!("{}", page.head().document_title());

    SettingsMenu { runtime, page }.enter_loop();
    Ok(())
}
