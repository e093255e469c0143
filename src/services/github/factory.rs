use rand::seq::IndexedRandom;
use rand::Rng;
use uuid::Uuid;

use crate::models::github_user::{
    access_token_for, EmailVisibility, GitHubEmail, GitHubProfile, GitHubUser,
};

pub const DEFAULT_AVATAR_URL: &str = "https://github.com/ghost.png";

const FIRST_NAMES: &[&str] = &[
    "Ada", "Alan", "Barbara", "Brendan", "Claude", "Dennis", "Edsger", "Frances", "Grace",
    "Guido", "Hedy", "Ken", "Linus", "Margaret", "Niklaus", "Radia", "Rob", "Sophie", "Tim",
    "Yukihiro",
];

const LAST_NAMES: &[&str] = &[
    "Allen", "Backus", "Hamilton", "Hopper", "Kernighan", "Knuth", "Lamarr", "Liskov",
    "Lovelace", "Matsumoto", "Perlman", "Pike", "Ritchie", "Rossum", "Stroustrup", "Thompson",
    "Torvalds", "Turing", "Wilson", "Wirth",
];

const EMAIL_DOMAINS: &[&str] = &["example.com", "example.net", "example.org", "mail.test"];

fn pick<'a, R: Rng + ?Sized>(rng: &mut R, items: &[&'a str]) -> &'a str {
    items.choose(rng).copied().unwrap_or_default()
}

fn random_email<R: Rng + ?Sized>(rng: &mut R) -> String {
    format!(
        "{}.{}{}@{}",
        pick(rng, FIRST_NAMES).to_lowercase(),
        pick(rng, LAST_NAMES).to_lowercase(),
        rng.random_range(1..10_000),
        pick(rng, EMAIL_DOMAINS)
    )
}

fn random_login<R: Rng + ?Sized>(rng: &mut R) -> String {
    format!(
        "{}_{}{}",
        pick(rng, FIRST_NAMES),
        pick(rng, LAST_NAMES),
        rng.random_range(10..1_000)
    )
}

fn random_email_entry<R: Rng + ?Sized>(rng: &mut R) -> GitHubEmail {
    GitHubEmail {
        email: random_email(rng),
        verified: rng.random_bool(0.5),
        primary: false,
        visibility: rng.random_bool(0.5).then_some(EmailVisibility::Public),
    }
}

/// Generates a synthetic GitHub account.
///
/// `code` becomes the record key; a random UUID is used when none is given.
/// The access token is derived from the code, everything else is random.
/// The account always has three emails: one unverified public address, one
/// verified private address and a verified primary address.
pub fn create_github_user(code: Option<&str>) -> GitHubUser {
    create_github_user_with_avatar(code, DEFAULT_AVATAR_URL)
}

pub fn create_github_user_with_avatar(code: Option<&str>, avatar_url: &str) -> GitHubUser {
    let mut rng = rand::rng();

    let primary_email = GitHubEmail {
        verified: true,
        primary: true,
        ..random_email_entry(&mut rng)
    };

    let emails = vec![
        GitHubEmail {
            email: random_email(&mut rng),
            verified: false,
            primary: false,
            visibility: Some(EmailVisibility::Public),
        },
        GitHubEmail {
            email: random_email(&mut rng),
            verified: true,
            primary: false,
            visibility: None,
        },
        primary_email.clone(),
    ];

    let code = code
        .map(str::to_string)
        .unwrap_or_else(|| Uuid::new_v4().to_string());

    GitHubUser {
        access_token: access_token_for(&code),
        profile: GitHubProfile {
            login: random_login(&mut rng),
            id: Uuid::new_v4().to_string(),
            name: format!(
                "{} {}",
                pick(&mut rng, FIRST_NAMES),
                pick(&mut rng, LAST_NAMES)
            ),
            avatar_url: avatar_url.to_string(),
            emails: emails.iter().map(|e| e.email.clone()).collect(),
        },
        emails,
        primary_email: primary_email.email,
        code,
    }
}
