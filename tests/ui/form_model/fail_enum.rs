#[derive(formstate::form::FormModel)]
#[allow(dead_code)]
enum ContactForm {
    Email { address: String },
    Phone { number: String },
}

fn main() {}
