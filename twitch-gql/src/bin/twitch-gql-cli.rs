use eyre::Context;
use serde::Serialize;
use tokio_stream::StreamExt;
use twitch_gql::{
    ClientConfig, FollowQueryOpts, GameQueryOpts, StreamQueryOpts, TwitchGql, User,
    VideoQueryOpts,
};

const USAGE: &str = "\
usage: twitch-gql-cli <command> [args]

commands:
  available <username>          is the username still free?
  me                            the account the token belongs to (needs TWITCH_GQL_TOKEN)
  users <login>...              look up users by login
  channels <name>...            look up channels by name
  streams [first]               live streams
  games [first]                 games by popularity
  videos <user-id> [first]      a user's videos
  followers <user-id> [first]   a user's followers
  mods <user-id>                every moderator of a user's channel
  vips <user-id>                every VIP of a user's channel
  clip <slug>                   a clip by slug

environment: TWITCH_GQL_ENDPOINT, TWITCH_GQL_CLIENT_ID, TWITCH_GQL_TOKEN, RUST_LOG";

fn print_json(value: &impl Serialize) -> eyre::Result<()> {
    let json = serde_json::to_string_pretty(value).context("serialize output")?;
    println!("{json}");
    Ok(())
}

fn parse_first(arg: Option<&String>) -> eyre::Result<i32> {
    match arg {
        None => Ok(0),
        Some(s) => s.parse().with_context(|| format!("parse page size '{s}'")),
    }
}

fn subject(arg: Option<&String>) -> eyre::Result<User> {
    let Some(id) = arg else {
        eyre::bail!("missing user id\n\n{USAGE}");
    };
    Ok(User {
        id: id.clone(),
        ..Default::default()
    })
}

#[tokio::main]
async fn main() -> eyre::Result<()> {
    twitch_gql::init_tracing();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let Some((command, rest)) = args.split_first() else {
        eprintln!("{USAGE}");
        std::process::exit(2);
    };

    let config = ClientConfig::from_env();
    tracing::debug!(?config, "loaded configuration");
    let client = TwitchGql::from_config(config).context("create GraphQL client")?;

    match command.as_str() {
        "available" => {
            let Some(username) = rest.first() else {
                eyre::bail!("missing username\n\n{USAGE}");
            };
            let available = client
                .is_username_available(username)
                .await
                .context("check username availability")?;
            print_json(&available)?;
        }
        "me" => {
            let user = client.get_current_user().await.context("fetch current user")?;
            print_json(&user)?;
        }
        "users" => {
            let users = client
                .get_users_by_login(rest)
                .await
                .context("look up users")?;
            print_json(&users)?;
        }
        "channels" => {
            let channels = client
                .get_channels_by_name(rest)
                .await
                .context("look up channels")?;
            print_json(&channels)?;
        }
        "streams" => {
            let opts = StreamQueryOpts {
                first: parse_first(rest.first())?,
                ..Default::default()
            };
            let streams = client.get_streams(&opts).await.context("list streams")?;
            print_json(&streams)?;
        }
        "games" => {
            let opts = GameQueryOpts {
                first: parse_first(rest.first())?,
                ..Default::default()
            };
            let games = client.get_games(&opts).await.context("list games")?;
            print_json(&games)?;
        }
        "videos" => {
            let user = subject(rest.first())?;
            let opts = VideoQueryOpts {
                first: parse_first(rest.get(1))?,
                after: None,
            };
            let videos = client
                .get_videos_by_user(&user, &opts)
                .await
                .context("list videos")?;
            print_json(&videos)?;
        }
        "followers" => {
            let user = subject(rest.first())?;
            let opts = FollowQueryOpts {
                first: parse_first(rest.get(1))?,
                after: None,
            };
            let followers = client
                .get_followers_for_user(&user, &opts)
                .await
                .context("list followers")?;
            print_json(&followers)?;
        }
        "mods" | "vips" => {
            let user = subject(rest.first())?;
            let mut edges = Vec::new();
            if command == "mods" {
                let mut stream = std::pin::pin!(client.list_mods_for_user(&user, 100));
                while let Some(edge) = stream.next().await {
                    edges.push(edge.context("fetch moderator")?);
                }
            } else {
                let mut stream = std::pin::pin!(client.list_vips_for_user(&user, 100));
                while let Some(edge) = stream.next().await {
                    edges.push(edge.context("fetch VIP")?);
                }
            }
            print_json(&edges)?;
        }
        "clip" => {
            let Some(slug) = rest.first() else {
                eyre::bail!("missing clip slug\n\n{USAGE}");
            };
            let clip = client.get_clip_by_slug(slug).await.context("fetch clip")?;
            print_json(&clip)?;
        }
        other => {
            eprintln!("unknown command '{other}'\n\n{USAGE}");
            std::process::exit(2);
        }
    }

    Ok(())
}
