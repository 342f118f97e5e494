mod security;
mod site;
