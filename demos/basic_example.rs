use google_analytics_rs::{GoogleAnalytics, Request};

fn init_tracing() {
    use tracing_subscriber::FmtSubscriber;

    let subscriber = FmtSubscriber::builder()
        .with_max_level(tracing::Level::DEBUG)
        .finish();

    tracing::subscriber::set_global_default(subscriber).expect("setting default subscriber failed");
}

fn main() {
    init_tracing();

    let analytics = GoogleAnalytics::for_app("UA-0000000-1", "demo-app", "0.1.0");

    // Blocking send.
    let response = analytics.send(
        &Request::new()
            .hit_type("pageview")
            .document_path("/home")
            .document_title("Home"),
    );
    println!("pageview: status={}", response.status_code);

    // Queued sends run off-thread, one at a time, in submission order.
    let first = analytics.post(
        Request::new()
            .hit_type("event")
            .event_category("demo")
            .event_action("signup"),
    );
    let second = analytics.post(
        Request::new()
            .hit_type("event")
            .event_category("demo")
            .event_action("login"),
    );

    println!("signup: status={}", first.wait().status_code);
    println!("login: status={}", second.wait().status_code);

    analytics.close();
}
