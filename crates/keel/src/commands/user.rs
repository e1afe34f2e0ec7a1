use std::io::Write;

use clap::{Args, Subcommand};

use keel_core::id::is_valid_id;
use keel_core::storage::UserRepository;
use keel_core::user::User;

use crate::error::CommandError;

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum UserCommand {
    /// Create a user and print it as JSON
    Create {
        #[arg(long)]
        handle: String,
        #[arg(long)]
        email: String,
        /// Defaults to the handle
        #[arg(long)]
        display_name: Option<String>,
        #[arg(long)]
        bio: Option<String>,
    },

    /// Print a user as JSON
    Get(GetArgs),

    /// Change profile fields and print the stored result
    Update {
        id: String,
        #[arg(long)]
        display_name: Option<String>,
        #[arg(long)]
        bio: Option<String>,
        #[arg(long)]
        handle: Option<String>,
        #[arg(long)]
        email: Option<String>,
    },

    /// Mark a user as seen now
    Touch { id: String },

    /// Delete a user
    Delete { id: String },
}

/// Exactly one lookup key.
#[derive(Args, Debug, Clone, PartialEq, Eq)]
#[group(required = true, multiple = false)]
pub struct GetArgs {
    pub id: Option<String>,
    #[arg(long)]
    pub email: Option<String>,
    #[arg(long)]
    pub handle: Option<String>,
}

fn valid_id(id: &str) -> Result<&str, CommandError> {
    if is_valid_id(id) {
        Ok(id)
    } else {
        Err(CommandError::InvalidId(id.to_string()))
    }
}

fn print_user(user: &User, out: &mut impl Write) -> Result<(), CommandError> {
    serde_json::to_writer_pretty(&mut *out, user)?;
    writeln!(out)?;
    Ok(())
}

/// Runs a user command against `repo`.
pub async fn run_user(
    repo: &dyn UserRepository,
    command: UserCommand,
    out: &mut impl Write,
) -> Result<(), CommandError> {
    match command {
        UserCommand::Create {
            handle,
            email,
            display_name,
            bio,
        } => {
            let display_name = display_name.unwrap_or_else(|| handle.clone());
            let mut user = User::new(handle, display_name, email);
            user.bio = bio;

            repo.create_user(&user).await?;
            tracing::info!(user_id = %user.id, handle = %user.handle, "Created user");
            print_user(&user, out)
        }

        UserCommand::Get(GetArgs { id, email, handle }) => {
            let user = match (id, email, handle) {
                (Some(id), _, _) => repo.get_user(valid_id(&id)?).await?,
                (_, Some(email), _) => repo.get_user_by_email(&email).await?,
                (_, _, Some(handle)) => repo.get_user_by_handle(&handle).await?,
                (None, None, None) => return Err(CommandError::MissingLookupKey),
            };
            print_user(&user, out)
        }

        UserCommand::Update {
            id,
            display_name,
            bio,
            handle,
            email,
        } => {
            let id = valid_id(&id)?;
            if display_name.is_none() && bio.is_none() && handle.is_none() && email.is_none() {
                return Err(CommandError::NothingToUpdate);
            }

            let mut user = repo.get_user(id).await?;
            if let Some(display_name) = display_name {
                user.display_name = display_name;
            }
            if let Some(bio) = bio {
                user.bio = Some(bio).filter(|b| !b.is_empty());
            }
            if let Some(handle) = handle {
                user.handle = handle;
            }
            if let Some(email) = email {
                user.email = email;
            }

            repo.update_user(&user).await?;
            tracing::info!(user_id = %id, "Updated user");
            print_user(&repo.get_user(id).await?, out)
        }

        UserCommand::Touch { id } => {
            let id = valid_id(&id)?;
            repo.update_last_seen(id).await?;
            writeln!(out, "{id}")?;
            Ok(())
        }

        UserCommand::Delete { id } => {
            let id = valid_id(&id)?;
            repo.delete_user(id).await?;
            tracing::info!(user_id = %id, "Deleted user");
            writeln!(out, "{id}")?;
            Ok(())
        }
    }
}
