//! 测试客户端 - calls the match-count service over TCP
//!
//! 运行方式:
//! 1. 先启动服务: cargo run -p server -- serve
//! 2. 运行客户端: cargo run -p server --example test_client -- [ADDR] [QUERY...]

use rpc::ShakespeareClient;
use tarpc::{client, context, tokio_serde::formats::Bincode};

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let mut args = std::env::args().skip(1);
    let addr = args
        .next()
        .unwrap_or_else(|| format!("127.0.0.1:{}", config::constants::DEFAULT_SERVER_PORT));
    let mut queries: Vec<String> = args.collect();
    if queries.is_empty() {
        queries = vec!["hello".into(), "world".into(), "to be, or not to be".into()];
    }

    println!("连接到: {addr}");
    let transport = tarpc::serde_transport::tcp::connect(&addr, Bincode::default).await?;
    let client = ShakespeareClient::new(client::Config::default(), transport).spawn();

    println!("\n=== ping ===");
    println!("Ping 响应: {}", client.ping(context::current()).await?);

    println!("\n=== check ===");
    let health = client.check(context::current(), String::new()).await?;
    println!("status: {}", health.status);

    println!("\n=== watch ===");
    match client.watch(context::current(), String::new()).await? {
        Ok(resp) => println!("status: {}", resp.status),
        Err(e) => println!("✗ {e}"),
    }

    println!("\n=== get_match_count ===");
    for query in queries {
        match client.get_match_count(context::current(), query.clone()).await? {
            Ok(resp) => println!("✓ {query:?}: {}", resp.match_count),
            Err(e) => println!("✗ {query:?}: {e}"),
        }
    }

    Ok(())
}
