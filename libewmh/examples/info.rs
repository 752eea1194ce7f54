use libewmh::prelude::*;

fn main() {
    let wm = WindowManager::connect(Config::new().verbose(true)).unwrap();
    println!("X11 Information");
    println!("-----------------------------------------------------------------------");
    println!("Screen:            {}", wm.server().screen());
    println!("Root Window:       {}", wm.root());
    println!("Screen Size:       {}", wm.screen_size());
    println!("Move/Resize:       {}", wm.supports_resizing());
    println!();
    match wm.client_list() {
        Some(clients) => libewmh::list(&wm, clients.windows(), &mut std::io::stdout()).unwrap(),
        None => println!("Could not get client list"),
    }
}
