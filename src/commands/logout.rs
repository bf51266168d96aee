use crate::{
    libs::{messages::Message, session::Session},
    msg_info, msg_success,
};
use anyhow::Result;

pub fn cmd() -> Result<()> {
    let mut session = Session::load()?;

    match session.current_user() {
        Some(user) => {
            session.clear();
            session.save()?;
            msg_success!(Message::LoggedOut(user.username));
        }
        None => msg_info!(Message::NotLoggedIn),
    }

    Ok(())
}
