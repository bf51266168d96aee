use crate::{
    db::users::Users,
    libs::{messages::Message, session::Session},
    msg_success,
};
use anyhow::Result;
use clap::Args;
use dialoguer::{theme::ColorfulTheme, Password};

#[derive(Debug, Args)]
pub struct RegisterArgs {
    #[arg(required = true)]
    username: String,
}

pub fn cmd(args: RegisterArgs) -> Result<()> {
    let password = Password::with_theme(&ColorfulTheme::default())
        .with_prompt(Message::PromptPassword.to_string())
        .with_confirmation(Message::PromptPasswordConfirm.to_string(), Message::PasswordMismatch.to_string())
        .interact()?;

    let username = args.username.trim().to_string();
    let user_id = Users::new()?.create(&username, &password)?;

    let mut session = Session::load()?;
    session.login(user_id, &username)?;
    session.save()?;

    msg_success!(Message::UserRegistered(username));
    Ok(())
}
