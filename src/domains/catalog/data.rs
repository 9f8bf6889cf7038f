//! Static catalog data for the Development Station site.
//!
//! These tables are the single source of truth for tool and category
//! metadata. Category counts are not stored here; the service derives
//! them from the tool list.

use super::model::{Category, Tool};

const fn tool(
    id: &'static str,
    name: &'static str,
    description: &'static str,
    category: &'static str,
    popular: bool,
) -> Tool {
    Tool {
        id,
        name,
        description,
        category,
        popular,
    }
}

/// All tools shipped with the site, grouped by category.
pub(super) fn default_tools() -> Vec<Tool> {
    vec![
        // Time & Date
        tool("unix-timestamp-converter", "Unix Timestamp Converter", "Convert Unix timestamps to dates and vice versa", "time", true),
        tool("world-clock", "World Clock", "Display time in multiple timezones", "time", false),
        tool("date-calculator", "Date Calculator", "Calculate date differences and add/subtract days", "time", false),
        tool("countdown-timer", "Countdown Timer", "Create countdown timers to specific dates", "time", false),
        tool("cron-builder", "Cron Expression Builder", "Build and validate cron expressions", "time", false),
        // Text Processing
        tool("case-converter", "Case Converter", "Convert text between different cases", "text", false),
        tool("word-counter", "Word Counter", "Count words, characters, and reading time", "text", false),
        tool("text-formatter", "Text Formatter", "Clean and format text content", "text", false),
        tool("text-diff", "Text Diff Checker", "Compare two texts and highlight differences", "text", false),
        tool("regex-tester", "Regex Tester", "Test regular expressions with live preview", "text", false),
        tool("string-manipulator", "String Manipulator", "Reverse, sort, and manipulate strings", "text", false),
        tool("lorem-generator", "Lorem Ipsum Generator", "Generate placeholder text content", "text", false),
        // Data Format
        tool("json-formatter", "JSON Formatter", "Format, validate, and minify JSON data", "data", true),
        tool("csv-converter", "CSV Converter", "Convert between CSV, JSON, and HTML", "data", false),
        tool("xml-formatter", "XML Formatter", "Format and validate XML documents", "data", false),
        tool("yaml-converter", "YAML Converter", "Convert between YAML and JSON", "data", false),
        tool("sql-formatter", "SQL Formatter", "Format and beautify SQL queries", "data", false),
        tool("binary-encoder", "Binary Encoder/Decoder", "Convert text to binary and binary to text", "data", true),
        tool("hex-encoder", "Hex Encoder/Decoder", "Convert text to hexadecimal and back", "data", true),
        tool("markdown-to-html", "Markdown → HTML", "Convert Markdown to HTML", "data", false),
        tool("html-to-markdown", "HTML → Markdown", "Convert HTML to Markdown", "data", false),
        // Number & Math
        tool("base-converter", "Base Converter", "Convert between binary, octal, decimal, hex", "number", false),
        tool("calculator", "Math Calculator", "Scientific calculator with advanced functions", "number", false),
        tool("percentage-calculator", "Percentage Calculator", "Calculate percentages and changes", "number", false),
        tool("number-formatter", "Number Formatter", "Format numbers with custom separators", "number", false),
        tool("random-generator", "Random Number Generator", "Generate random numbers with options", "number", false),
        tool("statistics", "Statistics Calculator", "Calculate mean, median, mode, and more", "number", false),
        // Security
        tool("password-generator", "Password Generator", "Generate secure, random passwords", "security", true),
        tool("hash-generator", "Hash Generator", "Generate MD5, SHA-1, SHA-256, SHA-512 hashes", "security", false),
        tool("base64-encoder", "Base64 Encoder/Decoder", "Encode and decode Base64 strings online free", "security", true),
        tool("jwt-decoder", "JWT Decoder", "Decode and analyze JWT tokens", "security", false),
        tool("uuid-generator", "UUID Generator", "Generate unique identifiers", "security", false),
        tool("url-encoder", "URL Encoder/Decoder", "Encode and decode URL components safely", "security", true),
        tool("html-encoder", "HTML Entity Encoder/Decoder", "Encode and decode HTML entities", "security", true),
        tool("aes-encrypt", "AES Encrypt/Decrypt", "Encrypt and decrypt text using AES encryption", "security", true),
        tool("rsa-keygen", "RSA Key Generator", "Generate RSA public and private key pairs", "security", true),
        tool("hmac-generator", "HMAC Generator", "Generate and verify HMAC for message authentication", "security", true),
        tool("totp-generator", "TOTP Generator", "Generate Time-based One-Time Passwords for 2FA", "security", true),
        // Web Development
        tool("html-formatter", "HTML Formatter", "Format, beautify, and minify HTML", "web", false),
        tool("css-minifier", "CSS Minifier", "Minify and optimize CSS code", "web", false),
        tool("js-beautifier", "JavaScript Beautifier", "Format and beautify JavaScript code", "web", false),
        tool("seo-analyzer", "SEO Analyzer", "Analyze webpage SEO elements", "web", false),
        tool("meta-generator", "Meta Tags Generator", "Generate SEO-optimized meta tags", "web", false),
        tool("url-analyzer", "URL Analyzer", "Parse and analyze URL components", "web", false),
        tool("favicon-generator", "Favicon Generator", "Generate favicon HTML code", "web", false),
        tool("performance-analyzer", "Performance Analyzer", "Analyze webpage performance", "web", false),
        tool("dns-lookup", "DNS Lookup", "Resolve DNS records via DoH", "web", false),
        tool("ssl-checker", "SSL Certificate Checker", "Check HTTPS status and headers", "web", false),
        tool("validators", "Validators", "Email, Credit Card, Phone validators", "web", false),
        // Network & System
        tool("ip-info", "IP Address Info", "Get information about IP addresses", "network", false),
        tool("user-agent", "User Agent Analyzer", "Analyze user agent strings", "network", false),
        tool("port-info", "Port Information", "Get information about network ports", "network", false),
        tool("browser-info", "Browser Information", "Display detailed browser info", "network", false),
        tool("mime-lookup", "MIME Type Lookup", "Find MIME types for file extensions", "network", false),
        tool("system-info", "System Information", "Display system and device info", "network", false),
        tool("whois-lookup", "WHOIS Lookup", "Lookup domain registration and DNS information", "network", true),
        tool("speed-test", "Website Speed Test", "Test website loading speed and performance", "network", true),
        // Image & Media
        tool("image-base64", "Image to Base64", "Convert images to Base64 data URLs", "image", false),
        tool("image-info", "Image Information", "Get detailed image file information", "image", false),
        tool("color-extractor", "Color Palette Extractor", "Extract colors from images", "image", false),
        tool("image-formats", "Image Format Info", "Information about image formats", "image", false),
        tool("placeholder-generator", "Placeholder Generator", "Generate placeholder images", "image", false),
        tool("color-converter", "Color Converter", "Convert colors between HEX, RGB, HSL", "image", false),
        tool("image-resizer", "Image Resizer & Compressor", "Resize and compress images", "image", false),
        tool("svg-optimizer", "SVG Optimizer", "Clean and minify SVG markup", "image", false),
        // Productivity
        tool("qr-generator", "QR Code Generator", "Generate QR codes for text and URLs", "productivity", true),
        tool("color-picker", "Color Picker", "Pick and convert colors between formats", "productivity", false),
        tool("notes", "Note Taking", "Simple note-taking with local storage", "productivity", false),
        tool("todo", "Todo List", "Task management with priorities", "productivity", false),
        tool("clipboard", "Clipboard Manager", "Manage multiple clipboard entries", "productivity", false),
        tool("unit-converter", "Unit Converter", "Convert between different units", "productivity", false),
    ]
}

/// All categories. `count` starts at zero and is derived by the service.
pub(super) fn default_categories() -> Vec<Category> {
    let category = |id, name, icon, description| Category {
        id,
        name,
        icon,
        description,
        count: 0,
    };

    vec![
        category("time", "Time & Date", "⏰", "Timestamp converters, world clock, date calculators"),
        category("text", "Text Processing", "📝", "Text manipulation, formatting, and analysis tools"),
        category("data", "Data Format", "📄", "JSON, XML, CSV, YAML formatters and converters"),
        category("number", "Number & Math", "🔢", "Calculators, converters, and math utilities"),
        category("security", "Security", "🔒", "Password generators, hash tools, encoders"),
        category("web", "Web Development", "🌐", "HTML, CSS, JavaScript tools and SEO analyzers"),
        category("network", "Network & System", "🖥️", "IP tools, browser info, system analysis"),
        category("image", "Image & Media", "🖼️", "Image processing and media utilities"),
        category("productivity", "Productivity", "📋", "QR codes, notes, todo lists, and utilities"),
    ]
}
