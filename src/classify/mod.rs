//! Keyword classification for ticket categories and chatbot replies.
//!
//! Matching is a case-insensitive substring test. Buckets are checked in
//! order and the first bucket with a matching keyword wins.

use crate::model::TicketCategory;


const CATEGORY_BUCKETS: &[(TicketCategory, &[&str])] = &[
    (TicketCategory::Network, &["network", "vpn", "wifi"]),
    (TicketCategory::Software, &["software", "install", "crash"]),
    (TicketCategory::Hardware, &["hardware", "printer", "monitor"]),
    (TicketCategory::Performance, &["slow", "performance"]),
];

const REPLY_SLOW: &str = "I understand your computer is running slow. Here are some steps you can try:\n\n\
1. **Restart your computer** - This clears temporary files and refreshes system resources.\n\
2. **Check Task Manager** - Press Ctrl+Shift+Esc to see what's using resources.\n\
3. **Run Disk Cleanup** - Type \"Disk Cleanup\" in the Start menu.\n\
4. **Close unnecessary programs** - Each open application uses memory.\n\n\
Would you like me to guide you through any of these steps?";

const REPLY_VPN: &str = "VPN connection issues can be frustrating. Let's troubleshoot:\n\n\
1. **Check your internet connection** - Make sure you're connected to the internet first.\n\
2. **Restart the VPN client** - Close and reopen the application.\n\
3. **Try a different VPN server** - Sometimes servers are overloaded.\n\
4. **Check your credentials** - Make sure your login details are correct.\n\n\
If the issue persists, I can create a ticket for the network team.";

const REPLY_PASSWORD: &str = "To reset your password:\n\n\
1. **Go to the Self-Service Portal** - Visit https://passwordreset.company.com\n\
2. **Click \"Forgot Password\"** - Enter your email address.\n\
3. **Check your email** - You'll receive a reset link within 5 minutes.\n\
4. **Create a new password** - Must be at least 12 characters with uppercase, lowercase, numbers, and symbols.\n\n\
If you're locked out, I can create a ticket for immediate assistance.";

const REPLY_PRINTER: &str = "Let's fix your printer issue:\n\n\
1. **Check if the printer is on** - Look for power lights.\n\
2. **Verify the connection** - Ensure USB/network cable is connected.\n\
3. **Restart the Print Spooler** - Go to Troubleshoot page to restart the service.\n\
4. **Update printer drivers** - I can help you install the latest drivers.\n\n\
Which printer model are you having trouble with?";

/// Reply used when no keyword matches
pub const DEFAULT_REPLY: &str = "I understand you need help. Could you please provide more details \
about your issue? I'm here to assist with any IT-related problems.";

const REPLY_BUCKETS: &[(&str, &str)] = &[
    ("slow", REPLY_SLOW),
    ("vpn", REPLY_VPN),
    ("password", REPLY_PASSWORD),
    ("printer", REPLY_PRINTER),
];

/// Category for a ticket's issue text, `General` when nothing matches.
pub fn categorize_ticket(issue: &str) -> TicketCategory {
    let lower = issue.to_lowercase();
    CATEGORY_BUCKETS
        .iter()
        .find(|(_, keywords)| keywords.iter().any(|k| lower.contains(k)))
        .map(|(category, _)| *category)
        .unwrap_or(TicketCategory::General)
}

/// Canned chatbot answer for a user message.
pub fn chatbot_reply(text: &str) -> &'static str {
    let lower = text.to_lowercase();
    REPLY_BUCKETS
        .iter()
        .find(|(keyword, _)| lower.contains(keyword))
        .map(|(_, reply)| *reply)
        .unwrap_or(DEFAULT_REPLY)
}
