use url::Url;

/// Characters that aren't allowed in file names on at least one common filesystem.
const DISALLOWED: [char; 9] = ['<', '>', ':', '"', '/', '\\', '|', '?', '*'];
const EMPTY_PATH_NAME: &str = "home";
const EXTENSION: &str = ".txt";

/// Turns a page URL into the name of the file its text is saved in.
///
/// Only the path is used: `https://example.com/team/staff` becomes `team_staff.txt`
/// and the site root becomes `home.txt`. Two URLs can map to the same name.
pub fn sanitize_filename(url: &Url) -> String {
    clean_name(url.path())
}

/// Applying this to its own output returns the output unchanged.
pub fn clean_name(path: &str) -> String {
    let mut name = path.trim_matches('/').replace('/', "_");
    if name.is_empty() {
        name.push_str(EMPTY_PATH_NAME);
    }
    if !name.ends_with(EXTENSION) {
        name.push_str(EXTENSION);
    }
    name.retain(|c| !DISALLOWED.contains(&c));
    name
}
