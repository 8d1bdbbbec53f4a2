use clap::Parser;
use dotenv::dotenv;
use portfolio_chat::models::chat::Role;
use portfolio_chat::widget::{
    run_exchange, ChatWidget, ExchangeOutcome, HttpTransport, SendRejection, WidgetEvent,
};
use std::error::Error;
use std::io::Write;
use tokio::io::{AsyncBufReadExt, BufReader};
use uuid::Uuid;

#[derive(Parser, Debug)]
#[command(author, version, about = "Terminal front end for the portfolio chat endpoint")]
struct ClientArgs {
    /// Full URL of the chat endpoint.
    #[arg(long, env = "CHAT_ENDPOINT", default_value = "http://127.0.0.1:3000/api/chat")]
    endpoint: String,

    /// Enable debug logging/output
    #[arg(long, env = "DEBUG", default_value = "false")]
    debug: bool,
}

/// Tracks how much of the newest assistant message is already on screen.
#[derive(Default)]
struct Renderer {
    message: Option<Uuid>,
    printed: usize,
}

impl Renderer {
    fn render(&mut self, widget: &ChatWidget) {
        let Some(last) = widget.conversation().last() else {
            return;
        };
        if last.role != Role::Assistant {
            return;
        }
        if self.message != Some(last.id) {
            if self.message.is_some() {
                println!();
            }
            self.message = Some(last.id);
            self.printed = 0;
            print!("assistant> ");
        }
        if last.text.len() > self.printed {
            print!("{}", &last.text[self.printed..]);
            self.printed = last.text.len();
        }
        std::io::stdout().flush().ok();
    }
}

fn print_help(widget: &ChatWidget) {
    println!("Commands: /open, /close, /quit, /1-/4 to ask a suggested question.");
    for (i, q) in widget.suggestions().iter().enumerate() {
        println!("  /{}  {}", i + 1, q);
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error + Send + Sync>> {
    dotenv().ok();
    let args = ClientArgs::parse();
    let default_filter = if args.debug { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter)).init();

    let transport = HttpTransport::new(args.endpoint);
    let mut widget = ChatWidget::new();
    widget.handle(WidgetEvent::OpenRequested);

    if let Some(greeting) = widget.conversation().last() {
        println!("assistant> {}", greeting.text);
    }
    print_help(&widget);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let line = line.trim();
        match line {
            "/quit" => break,
            "/open" => {
                widget.handle(WidgetEvent::OpenRequested);
                continue;
            }
            "/close" => {
                widget.handle(WidgetEvent::CloseRequested);
                println!("(chat collapsed, /open to continue)");
                continue;
            }
            _ => {}
        }

        match line.strip_prefix('/').and_then(|n| n.parse::<usize>().ok()) {
            Some(n) if n >= 1 => {
                if !widget.pick_suggestion(n - 1) {
                    println!("(no suggestion #{})", n);
                    continue;
                }
                println!("you> {}", widget.input());
            }
            _ => widget.set_input(line),
        }

        let mut renderer = Renderer::default();
        let result = tokio::select! {
            res = run_exchange(&mut widget, &transport, |w| renderer.render(w)) => Some(res),
            _ = tokio::signal::ctrl_c() => None,
        };

        match result {
            Some(Ok(ExchangeOutcome::Completed)) => println!(),
            Some(Ok(ExchangeOutcome::Interrupted)) => println!("\n(reply cut off)"),
            Some(Ok(ExchangeOutcome::Failed(_))) => println!(),
            Some(Ok(ExchangeOutcome::Cancelled)) => println!("\n(cancelled)"),
            Some(Err(SendRejection::Collapsed)) => println!("(chat is collapsed, /open first)"),
            Some(Err(SendRejection::EmptyInput)) => {}
            Some(Err(SendRejection::Busy)) => println!("(still waiting for a reply)"),
            None => {
                widget.handle(WidgetEvent::CancelRequested);
                println!("\n(cancelled)");
            }
        }
    }

    Ok(())
}
