use crate::{
    db::users::Users,
    libs::{messages::Message, session::Session},
    msg_success,
};
use anyhow::Result;
use clap::Args;
use dialoguer::{theme::ColorfulTheme, Password};

#[derive(Debug, Args)]
pub struct LoginArgs {
    #[arg(required = true)]
    username: String,
}

pub fn cmd(login_args: LoginArgs) -> Result<()> {
    let password = Password::with_theme(&ColorfulTheme::default())
        .with_prompt(Message::PromptPassword.to_string())
        .interact()?;

    let user = Users::new()?.authenticate(&login_args.username, &password)?;

    let mut session = Session::load()?;
    session.login(user.id, &user.username)?;
    session.save()?;

    msg_success!(Message::LoggedIn(user.username));
    Ok(())
}
