//! Print an argon2 hash for a password, for seeding the `users` table by hand

use clap::Parser;

use dorm_attendance::services::users::hash_password;

#[derive(Parser)]
#[command(name = "hash-password", about = "Hash a password for the users table")]
struct Args {
    /// Password to hash
    password: String,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let hash = hash_password(&args.password)?;
    println!("{}", hash);

    Ok(())
}
